use crate::calendar::CalendarSettings;
use crate::league::{GameKind, Schedule, ScheduledGame};
use crate::{SeasonResult, TeamId, TeamRegistry};
use chrono::{NaiveTime, Weekday};
use log::{debug, info};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

const STANDARD_CONFERENCES: usize = 2;
const STANDARD_DIVISIONS: usize = 4;
const STANDARD_DIVISION_SIZE: usize = 4;

type Round = Vec<(TeamId, TeamId)>;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Builds the preseason and regular-season games of `year`. The same
    /// (`seed`, `year`) always produces the same schedule.
    pub fn generate(registry: &TeamRegistry, calendar: &CalendarSettings, year: i32, seed: u64) -> SeasonResult<Schedule> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ (year as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut schedule = Schedule::new(year);

        Self::generate_preseason(&mut schedule, registry, calendar, &mut rng);
        Self::generate_regular_season(&mut schedule, registry, calendar, year, &mut rng);

        info!(
            "🗓️ schedule for {} generated: {} preseason, {} regular season games",
            year,
            schedule.games().filter(|g| g.kind == GameKind::Preseason).count(),
            schedule.games().filter(|g| g.kind == GameKind::RegularSeason).count()
        );

        Ok(schedule)
    }

    fn generate_preseason(schedule: &mut Schedule, registry: &TeamRegistry, calendar: &CalendarSettings, rng: &mut ChaCha8Rng) {
        let year = schedule.year;

        for week in calendar.preseason.weeks().filter(|week| !calendar.is_bye_week(*week)) {
            let mut teams = registry.ids();
            teams.shuffle(rng);

            for (index, pair) in teams.chunks_exact(2).enumerate() {
                schedule.add_game(ScheduledGame::new(
                    format!("{}-P{:02}-{:02}", year, week, index + 1),
                    pair[0],
                    pair[1],
                    week,
                    Weekday::Sat,
                    time(19, 0),
                    GameKind::Preseason,
                ));
            }
        }
    }

    fn generate_regular_season(
        schedule: &mut Schedule,
        registry: &TeamRegistry,
        calendar: &CalendarSettings,
        year: i32,
        rng: &mut ChaCha8Rng,
    ) {
        let weeks: Vec<u8> = calendar.regular_season.weeks().collect();

        let slates = match Self::standard_layout(registry) {
            Some(conferences) => {
                let mut rounds = Self::standard_rounds(&conferences, year);
                rounds.shuffle(rng);
                Self::spread_with_byes(rounds, weeks.len(), year)
            }
            None => {
                debug!("non-standard league layout, using round robin");
                Self::round_robin_slates(&registry.ids(), weeks.len())
            }
        };

        for (week, mut games) in weeks.into_iter().zip(slates) {
            games.shuffle(rng);
            Self::schedule_week(schedule, week, games);
        }
    }

    /// Conference → division → teams, when the league is two conferences of
    /// four four-team divisions.
    fn standard_layout(registry: &TeamRegistry) -> Option<Vec<Vec<Vec<TeamId>>>> {
        let conferences = registry.conferences();
        if conferences.len() != STANDARD_CONFERENCES {
            return None;
        }

        let mut layout = Vec::new();
        for conference in &conferences {
            let divisions: Vec<Vec<TeamId>> = registry
                .divisions(conference)
                .iter()
                .map(|division| registry.division_teams(conference, division))
                .collect();

            if divisions.len() != STANDARD_DIVISIONS || divisions.iter().any(|d| d.len() != STANDARD_DIVISION_SIZE) {
                return None;
            }

            layout.push(divisions);
        }

        Some(layout)
    }

    /// 17 full rounds: 6 division, 8 intra-conference and 3 inter-conference.
    fn standard_rounds(conferences: &[Vec<Vec<TeamId>>], year: i32) -> Vec<Round> {
        let rotation = year.rem_euclid(12) as usize;
        let mut rounds = Vec::new();

        // home and away against every division rival
        let division_rounds: Vec<Vec<Round>> = conferences
            .iter()
            .flatten()
            .map(|division| double_round_robin(division))
            .collect();

        for index in 0..division_rounds[0].len() {
            rounds.push(division_rounds.iter().flat_map(|d| d[index].clone()).collect());
        }

        // two other divisions of the same conference, all four opponents each
        for step in 0..2 {
            let partner = 1 + (rotation + step) % 3;

            for offset in 0..STANDARD_DIVISION_SIZE {
                let mut round = Vec::new();

                for divisions in conferences {
                    let others: Vec<usize> = (1..STANDARD_DIVISIONS).filter(|d| *d != partner).collect();

                    round.extend(cross_division(&divisions[0], &divisions[partner], offset));
                    round.extend(cross_division(&divisions[others[0]], &divisions[others[1]], offset));
                }

                rounds.push(round);
            }
        }

        // three of the four teams of one division in the other conference
        let shift = rotation % STANDARD_DIVISIONS;
        for step in 0..3 {
            let offset = (rotation + step) % STANDARD_DIVISION_SIZE;

            let round = (0..STANDARD_DIVISIONS)
                .flat_map(|d| {
                    cross_division(&conferences[0][d], &conferences[1][(d + shift) % STANDARD_DIVISIONS], offset)
                })
                .collect();

            rounds.push(round);
        }

        rounds
    }

    /// Sixteen rounds take a week each. The last round is split across two
    /// mid-season weeks so every team gets exactly one bye.
    fn spread_with_byes(mut rounds: Vec<Round>, weeks: usize, year: i32) -> Vec<Round> {
        if rounds.len() + 1 != weeks {
            rounds.truncate(weeks);
            return rounds;
        }

        let Some(split) = rounds.pop() else {
            return rounds;
        };

        let half = split.len() / 2;
        let first_bye = 5 + year.rem_euclid(4) as usize;
        let second_bye = first_bye + 4;

        let mut halves = [split[..half].to_vec(), split[half..].to_vec()].into_iter();
        let mut full = rounds.into_iter();

        (0..weeks)
            .map(|index| {
                if index == first_bye || index == second_bye {
                    halves.next().unwrap_or_default()
                } else {
                    full.next().unwrap_or_default()
                }
            })
            .collect()
    }

    fn round_robin_slates(teams: &[TeamId], weeks: usize) -> Vec<Round> {
        let single = round_robin(teams);
        if single.is_empty() {
            return Vec::new();
        }

        let mirrored = single.iter().map(|round| round.iter().map(|(home, away)| (*away, *home)).collect::<Round>());

        single.iter().cloned().chain(mirrored).cycle().take(weeks).collect()
    }

    fn schedule_week(schedule: &mut Schedule, week: u8, games: Round) {
        let year = schedule.year;
        let count = games.len();

        for (index, (home, away)) in games.into_iter().enumerate() {
            let (day, kickoff) = Self::slot(index, count);

            schedule.add_game(ScheduledGame::new(
                format!("{}-R{:02}-{:02}", year, week, index + 1),
                home,
                away,
                week,
                day,
                kickoff,
                GameKind::RegularSeason,
            ));
        }
    }

    /// Thursday night opens the week, Monday night closes it, everything else
    /// is Sunday with the late window getting the final third.
    fn slot(index: usize, count: usize) -> (Weekday, NaiveTime) {
        if count >= 3 && index == 0 {
            return (Weekday::Thu, time(20, 15));
        }
        if count >= 3 && index == count - 1 {
            return (Weekday::Mon, time(20, 15));
        }

        let (first_sunday, sunday_games) = if count >= 3 { (1, count - 2) } else { (0, count) };
        let position = index - first_sunday;

        if position + 1 == sunday_games && sunday_games > 1 {
            (Weekday::Sun, time(20, 20))
        } else if position * 3 >= sunday_games * 2 {
            (Weekday::Sun, time(16, 25))
        } else {
            (Weekday::Sun, time(13, 0))
        }
    }
}

/// Circle method. Odd team counts leave one team idle each round.
fn round_robin(teams: &[TeamId]) -> Vec<Round> {
    let mut slots: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let size = slots.len();
    let mut rounds = Vec::new();

    for index in 0..size.saturating_sub(1) {
        let mut round = Vec::new();

        for pair in 0..size / 2 {
            if let (Some(a), Some(b)) = (slots[pair], slots[size - 1 - pair]) {
                if (index + pair) % 2 == 0 {
                    round.push((a, b));
                } else {
                    round.push((b, a));
                }
            }
        }

        rounds.push(round);
        slots[1..].rotate_right(1);
    }

    rounds
}

fn double_round_robin(teams: &[TeamId]) -> Vec<Round> {
    let single = round_robin(teams);
    let mirrored: Vec<Round> = single
        .iter()
        .map(|round| round.iter().map(|(home, away)| (*away, *home)).collect())
        .collect();

    single.into_iter().chain(mirrored).collect()
}

fn cross_division(first: &[TeamId], second: &[TeamId], offset: usize) -> Round {
    (0..first.len())
        .map(|index| {
            let a = first[index];
            let b = second[(index + offset) % second.len()];
            if (index + offset) % 2 == 0 { (a, b) } else { (b, a) }
        })
        .collect()
}
