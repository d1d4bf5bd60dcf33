use crate::league::{GameKind, Participant, Placeholder, PlayoffSeeds, Schedule, ScheduledGame, PLAYOFF_SEEDS};
use crate::{PlayoffRound, SeasonError, SeasonResult, TeamId};
use chrono::{NaiveTime, Weekday};
use log::{debug, info};

const WILD_CARD_PAIRINGS: [(usize, usize); 3] = [(2, 7), (3, 6), (4, 5)];
const WILD_CARD_KICKOFFS: [(u32, u32); 3] = [(13, 0), (16, 30), (20, 15)];
const DIVISIONAL_KICKOFFS: [(u32, u32); 2] = [(15, 0), (18, 30)];
const CHAMPIONSHIP_KICKOFF: (u32, u32) = (18, 30);
const FINAL_KICKOFF: (u32, u32) = (18, 30);

fn kickoff((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// The first conference plays its slate on Sunday, the second on Monday.
fn conference_day(index: usize) -> Weekday {
    match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        _ => Weekday::Sat,
    }
}

fn round_code(round: PlayoffRound) -> &'static str {
    match round {
        PlayoffRound::WildCard => "WC",
        PlayoffRound::Divisional => "DIV",
        PlayoffRound::ConferenceChampionship => "CC",
        PlayoffRound::FinalBowl => "FINAL",
    }
}

struct Assignment {
    conference: Option<String>,
    placeholder: Placeholder,
    team: TeamId,
}

impl Schedule {
    /// Writes the games of `round` into `week`. The Wild Card round gets
    /// concrete teams (2v7, 3v6, 4v5, seed 1 on bye); later rounds get
    /// placeholder slots. A round that already exists is left alone.
    pub fn materialize_playoff_round(&mut self, round: PlayoffRound, seeds: &PlayoffSeeds, week: u8) -> SeasonResult<usize> {
        if !self.playoff_games(round).is_empty() {
            debug!("{} already materialized", round);
            return Ok(0);
        }

        let year = self.year;
        let mut games = Vec::new();

        for (index, (conference, teams)) in seeds.iter().enumerate() {
            if teams.len() != PLAYOFF_SEEDS {
                return Err(SeasonError::NotEnoughTeams {
                    conference: conference.clone(),
                    found: teams.len(),
                    required: PLAYOFF_SEEDS,
                });
            }

            let day = conference_day(index);
            let id = |slot: usize| format!("{}-{}-{}-{}", year, round_code(round), conference, slot + 1);

            match round {
                PlayoffRound::WildCard => {
                    for (slot, (high, low)) in WILD_CARD_PAIRINGS.iter().enumerate() {
                        games.push(ScheduledGame::new(
                            id(slot),
                            teams[high - 1],
                            teams[low - 1],
                            week,
                            day,
                            kickoff(WILD_CARD_KICKOFFS[slot]),
                            GameKind::Playoff,
                        ));
                    }
                }
                PlayoffRound::Divisional => {
                    let pairings = [
                        (Participant::Team(teams[0]), Participant::Placeholder(Placeholder::LowestSeedWinner)),
                        (
                            Participant::Placeholder(Placeholder::HighSeedHost),
                            Participant::Placeholder(Placeholder::OtherWinner),
                        ),
                    ];

                    for (slot, (home, away)) in pairings.into_iter().enumerate() {
                        games.push(placeholder_game(id(slot), home, away, week, day, kickoff(DIVISIONAL_KICKOFFS[slot])));
                    }
                }
                PlayoffRound::ConferenceChampionship => {
                    games.push(placeholder_game(
                        id(0),
                        Participant::Placeholder(Placeholder::ChampionshipHost),
                        Participant::Placeholder(Placeholder::ChampionshipVisitor),
                        week,
                        day,
                        kickoff(CHAMPIONSHIP_KICKOFF),
                    ));
                }
                PlayoffRound::FinalBowl => {}
            }

            for game in games.iter_mut().filter(|game| game.conference.is_none()) {
                game.conference = Some(conference.clone());
            }
        }

        if round == PlayoffRound::FinalBowl {
            games.push(placeholder_game(
                format!("{}-{}", year, round_code(round)),
                Participant::Placeholder(Placeholder::FinalHost),
                Participant::Placeholder(Placeholder::FinalVisitor),
                week,
                Weekday::Sun,
                kickoff(FINAL_KICKOFF),
            ));
        }

        let created = games.len();
        for mut game in games {
            game.round = Some(round);
            self.add_game(game);
        }

        info!("🏈 {} materialized: {} games in week {}", round, created, week);

        Ok(created)
    }

    /// Rewrites the placeholder slots of `round` from the winners of the
    /// previous round. Nothing is written unless every conference has the
    /// number of winners the round needs. Returns the number of slots filled.
    pub fn resolve_placeholders(&mut self, round: PlayoffRound, winners: &[TeamId], seeds: &PlayoffSeeds) -> SeasonResult<usize> {
        let assignments = match round {
            PlayoffRound::WildCard => return Ok(0),
            PlayoffRound::Divisional => divisional_assignments(winners, seeds)?,
            PlayoffRound::ConferenceChampionship => championship_assignments(winners, seeds)?,
            PlayoffRound::FinalBowl => final_assignments(winners, seeds)?,
        };

        let mut filled = 0;

        for assignment in assignments {
            for game in self.games_mut() {
                if game.round != Some(round) || !game.is_playoff() || game.conference != assignment.conference {
                    continue;
                }

                for slot in [&mut game.home, &mut game.away] {
                    if *slot == Participant::Placeholder(assignment.placeholder) {
                        *slot = Participant::Team(assignment.team);
                        filled += 1;
                    }
                }
            }
        }

        debug!("{}: {} placeholder slots resolved", round, filled);

        Ok(filled)
    }
}

fn placeholder_game(id: String, home: Participant, away: Participant, week: u8, day: Weekday, kickoff: NaiveTime) -> ScheduledGame {
    ScheduledGame {
        id,
        home,
        away,
        week,
        day,
        kickoff,
        kind: GameKind::Playoff,
        round: None,
        conference: None,
        result: None,
    }
}

/// Winners of `conference` as (seed, team), best seed first.
fn conference_survivors(
    round: PlayoffRound,
    conference: &str,
    winners: &[TeamId],
    seeds: &PlayoffSeeds,
    expected: usize,
) -> SeasonResult<Vec<(usize, TeamId)>> {
    let mut survivors: Vec<(usize, TeamId)> = winners
        .iter()
        .filter_map(|team| seeds.seed_in(conference, *team).map(|seed| (seed, *team)))
        .collect();

    survivors.sort();
    survivors.dedup();

    if survivors.len() < expected {
        return Err(SeasonError::InsufficientWinners {
            round,
            conference: conference.to_string(),
            expected,
            found: survivors.len(),
        });
    }

    if survivors.len() > expected {
        return Err(SeasonError::InvariantViolation(format!(
            "{} expects {} winners from {}, got {}",
            round,
            expected,
            conference,
            survivors.len()
        )));
    }

    Ok(survivors)
}

fn divisional_assignments(winners: &[TeamId], seeds: &PlayoffSeeds) -> SeasonResult<Vec<Assignment>> {
    let mut assignments = Vec::new();

    for (conference, teams) in seeds.iter() {
        let top_seed = teams.first().copied();
        let wild_card_winners: Vec<TeamId> = winners.iter().copied().filter(|team| Some(*team) != top_seed).collect();

        let survivors = conference_survivors(PlayoffRound::Divisional, conference, &wild_card_winners, seeds, 3)?;

        let (_, lowest) = survivors[2];
        let (_, host) = survivors[0];
        let (_, visitor) = survivors[1];

        for (placeholder, team) in [
            (Placeholder::LowestSeedWinner, lowest),
            (Placeholder::HighSeedHost, host),
            (Placeholder::OtherWinner, visitor),
        ] {
            assignments.push(Assignment {
                conference: Some(conference.clone()),
                placeholder,
                team,
            });
        }
    }

    Ok(assignments)
}

fn championship_assignments(winners: &[TeamId], seeds: &PlayoffSeeds) -> SeasonResult<Vec<Assignment>> {
    let mut assignments = Vec::new();

    for (conference, _) in seeds.iter() {
        let survivors = conference_survivors(PlayoffRound::ConferenceChampionship, conference, winners, seeds, 2)?;

        assignments.push(Assignment {
            conference: Some(conference.clone()),
            placeholder: Placeholder::ChampionshipHost,
            team: survivors[0].1,
        });
        assignments.push(Assignment {
            conference: Some(conference.clone()),
            placeholder: Placeholder::ChampionshipVisitor,
            team: survivors[1].1,
        });
    }

    Ok(assignments)
}

fn final_assignments(winners: &[TeamId], seeds: &PlayoffSeeds) -> SeasonResult<Vec<Assignment>> {
    let mut champions: Vec<(usize, TeamId)> = winners
        .iter()
        .filter_map(|team| seeds.seed_of(*team).map(|seed| (seed, *team)))
        .collect();

    champions.sort();
    champions.dedup();

    if champions.len() < 2 {
        return Err(SeasonError::InsufficientWinners {
            round: PlayoffRound::FinalBowl,
            conference: String::from("league"),
            expected: 2,
            found: champions.len(),
        });
    }

    if champions.len() > 2 {
        return Err(SeasonError::InvariantViolation(format!(
            "{} expects 2 conference champions, got {}",
            PlayoffRound::FinalBowl,
            champions.len()
        )));
    }

    Ok(vec![
        Assignment {
            conference: None,
            placeholder: Placeholder::FinalHost,
            team: champions[0].1,
        },
        Assignment {
            conference: None,
            placeholder: Placeholder::FinalVisitor,
            team: champions[1].1,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> PlayoffSeeds {
        let mut seeds = PlayoffSeeds::default();
        seeds.insert("Atlas", (1..=7).map(TeamId).collect());
        seeds.insert("Nova", (11..=17).map(TeamId).collect());
        seeds
    }

    fn materialized() -> Schedule {
        let seeds = seeds();
        let mut schedule = Schedule::new(2025);
        for (offset, round) in PlayoffRound::ALL.iter().enumerate() {
            schedule.materialize_playoff_round(*round, &seeds, 23 + offset as u8).unwrap();
        }
        schedule
    }

    fn game<'a>(schedule: &'a Schedule, id: &str) -> &'a ScheduledGame {
        schedule.game(id).unwrap()
    }

    #[test]
    fn test_wild_card_pairings() {
        let schedule = materialized();
        let games = schedule.playoff_games(PlayoffRound::WildCard);

        assert_eq!(games.len(), 6);

        let atlas: Vec<(TeamId, TeamId)> = games
            .iter()
            .filter(|g| g.conference.as_deref() == Some("Atlas"))
            .filter_map(|g| g.teams())
            .collect();

        assert_eq!(
            atlas,
            vec![(TeamId(2), TeamId(7)), (TeamId(3), TeamId(6)), (TeamId(4), TeamId(5))]
        );
        assert!(!games.iter().any(|g| g.involves(TeamId(1)) || g.involves(TeamId(11))));
        assert_eq!(game(&schedule, "2025-WC-Atlas-1").day, Weekday::Sun);
        assert_eq!(game(&schedule, "2025-WC-Nova-1").day, Weekday::Mon);
    }

    #[test]
    fn test_later_rounds_hold_placeholders() {
        let schedule = materialized();

        assert_eq!(schedule.playoff_games(PlayoffRound::Divisional).len(), 4);
        assert_eq!(schedule.playoff_games(PlayoffRound::ConferenceChampionship).len(), 2);

        let div = game(&schedule, "2025-DIV-Nova-1");
        assert_eq!(div.home, Participant::Team(TeamId(11)));
        assert_eq!(div.away, Participant::Placeholder(Placeholder::LowestSeedWinner));

        let final_bowl = game(&schedule, "2025-FINAL");
        assert_eq!(final_bowl.conference, None);
        assert!(!final_bowl.is_resolved());
    }

    #[test]
    fn test_materialize_twice_does_not_duplicate() {
        let mut schedule = materialized();

        assert_eq!(
            schedule.materialize_playoff_round(PlayoffRound::WildCard, &seeds(), 23).unwrap(),
            0
        );
        assert_eq!(schedule.playoff_games(PlayoffRound::WildCard).len(), 6);
    }

    #[test]
    fn test_divisional_top_seed_meets_lowest_survivor() {
        let mut schedule = materialized();

        // Atlas: 7 upsets 2, 3 and 4 hold. Nova: 5, 6 and 7 all win.
        let winners = vec![TeamId(7), TeamId(3), TeamId(4), TeamId(17), TeamId(16), TeamId(15)];
        let filled = schedule.resolve_placeholders(PlayoffRound::Divisional, &winners, &seeds()).unwrap();

        assert_eq!(filled, 6);
        assert_eq!(game(&schedule, "2025-DIV-Atlas-1").teams(), Some((TeamId(1), TeamId(7))));
        assert_eq!(game(&schedule, "2025-DIV-Atlas-2").teams(), Some((TeamId(3), TeamId(4))));
        assert_eq!(game(&schedule, "2025-DIV-Nova-1").teams(), Some((TeamId(11), TeamId(17))));
        assert_eq!(game(&schedule, "2025-DIV-Nova-2").teams(), Some((TeamId(15), TeamId(16))));
        assert!(schedule.playoff_games(PlayoffRound::Divisional).iter().all(|g| g.is_resolved()));
    }

    #[test]
    fn test_insufficient_winners_rewrites_nothing() {
        let mut schedule = materialized();
        let before = schedule.clone();

        let winners = vec![TeamId(2), TeamId(3), TeamId(4), TeamId(12), TeamId(13)];
        let result = schedule.resolve_placeholders(PlayoffRound::Divisional, &winners, &seeds());

        assert!(matches!(
            result,
            Err(SeasonError::InsufficientWinners { expected: 3, found: 2, .. })
        ));
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_championship_and_final_better_seed_hosts() {
        let mut schedule = materialized();
        let seeds = seeds();

        schedule
            .resolve_placeholders(PlayoffRound::ConferenceChampionship, &[TeamId(6), TeamId(2), TeamId(11), TeamId(14)], &seeds)
            .unwrap();

        assert_eq!(game(&schedule, "2025-CC-Atlas-1").teams(), Some((TeamId(2), TeamId(6))));
        assert_eq!(game(&schedule, "2025-CC-Nova-1").teams(), Some((TeamId(11), TeamId(14))));

        schedule
            .resolve_placeholders(PlayoffRound::FinalBowl, &[TeamId(6), TeamId(14)], &seeds)
            .unwrap();
        assert_eq!(game(&schedule, "2025-FINAL").teams(), Some((TeamId(14), TeamId(6))));

        let mut tied = materialized();
        tied.resolve_placeholders(PlayoffRound::FinalBowl, &[TeamId(12), TeamId(2)], &seeds)
            .unwrap();
        assert_eq!(game(&tied, "2025-FINAL").teams(), Some((TeamId(2), TeamId(12))));
    }

    #[test]
    fn test_final_rejects_extra_champions() {
        let mut schedule = materialized();
        let before = schedule.clone();

        let result = schedule.resolve_placeholders(PlayoffRound::FinalBowl, &[TeamId(2), TeamId(12), TeamId(3)], &seeds());

        assert!(matches!(result, Err(SeasonError::InvariantViolation(_))));
        assert_eq!(schedule, before);
    }
}
