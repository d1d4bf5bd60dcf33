use crate::calendar::CalendarSettings;
use crate::league::{GameResult, PlayoffSeeds, Schedule};
use crate::{Diagnostic, PlayoffRound, SeasonError, SeasonResult, TeamId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketStage {
    WildCard,
    Divisional,
    ConferenceChampionship,
    FinalBowl,
    Complete,
}

impl BracketStage {
    pub fn round(&self) -> Option<PlayoffRound> {
        match self {
            BracketStage::WildCard => Some(PlayoffRound::WildCard),
            BracketStage::Divisional => Some(PlayoffRound::Divisional),
            BracketStage::ConferenceChampionship => Some(PlayoffRound::ConferenceChampionship),
            BracketStage::FinalBowl => Some(PlayoffRound::FinalBowl),
            BracketStage::Complete => None,
        }
    }

    fn from_round(round: PlayoffRound) -> Self {
        match round {
            PlayoffRound::WildCard => BracketStage::WildCard,
            PlayoffRound::Divisional => BracketStage::Divisional,
            PlayoffRound::ConferenceChampionship => BracketStage::ConferenceChampionship,
            PlayoffRound::FinalBowl => BracketStage::FinalBowl,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Deferred(Diagnostic),
    Advanced { round: PlayoffRound, winners: Vec<TeamId> },
    Completed { champion: TeamId, runner_up: TeamId },
    AlreadyComplete,
}

/// Seeds plus the progress of the single-elimination rounds of one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffBracket {
    pub year: i32,
    pub seeds: PlayoffSeeds,
    stage: BracketStage,
    winners: BTreeMap<PlayoffRound, Vec<TeamId>>,
    champion: Option<TeamId>,
    runner_up: Option<TeamId>,
}

impl PlayoffBracket {
    pub fn new(year: i32, seeds: PlayoffSeeds) -> Self {
        PlayoffBracket {
            year,
            seeds,
            stage: BracketStage::WildCard,
            winners: BTreeMap::new(),
            champion: None,
            runner_up: None,
        }
    }

    pub fn stage(&self) -> BracketStage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage == BracketStage::Complete
    }

    pub fn champion(&self) -> Option<TeamId> {
        self.champion
    }

    pub fn runner_up(&self) -> Option<TeamId> {
        self.runner_up
    }

    pub fn winners(&self, round: PlayoffRound) -> &[TeamId] {
        self.winners.get(&round).map(|winners| winners.as_slice()).unwrap_or(&[])
    }

    /// Writes every playoff round into its calendar week. Only the Wild Card
    /// round has concrete teams at this point.
    pub fn materialize(&self, schedule: &mut Schedule, calendar: &CalendarSettings) -> SeasonResult<usize> {
        let mut created = 0;

        for round in PlayoffRound::ALL {
            created += schedule.materialize_playoff_round(round, &self.seeds, calendar.week_of_round(round))?;
        }

        Ok(created)
    }

    /// Closes the current round from `results` and fills the next round's
    /// placeholders. Missing or tied games defer the round untouched.
    pub fn advance_round(&mut self, results: &[GameResult], schedule: &mut Schedule) -> SeasonResult<AdvanceOutcome> {
        let Some(round) = self.stage.round() else {
            return Ok(AdvanceOutcome::AlreadyComplete);
        };

        let round_results: Vec<&GameResult> = results.iter().filter(|result| result.round == Some(round)).collect();
        let expected = round.expected_games(self.seeds.len());

        if round_results.len() < expected {
            return Ok(AdvanceOutcome::Deferred(Diagnostic::RoundDeferred {
                round,
                reason: format!("{} of {} games completed", round_results.len(), expected),
            }));
        }

        let mut winners = Vec::with_capacity(round_results.len());
        for result in &round_results {
            match result.winner() {
                Some(winner) => winners.push(winner),
                None => {
                    return Ok(AdvanceOutcome::Deferred(Diagnostic::TiedPlayoffGame {
                        game_id: result.game_id.clone(),
                    }));
                }
            }
        }

        if round == PlayoffRound::FinalBowl {
            let final_game = round_results[0];
            let (champion, runner_up) = match (final_game.winner(), final_game.loser()) {
                (Some(champion), Some(runner_up)) => (champion, runner_up),
                _ => {
                    return Ok(AdvanceOutcome::Deferred(Diagnostic::TiedPlayoffGame {
                        game_id: final_game.game_id.clone(),
                    }));
                }
            };

            self.winners.insert(round, winners);
            self.champion = Some(champion);
            self.runner_up = Some(runner_up);
            self.stage = BracketStage::Complete;

            info!("🏆 {} champion: {} (runner-up {})", self.year, champion, runner_up);

            return Ok(AdvanceOutcome::Completed { champion, runner_up });
        }

        let Some(next) = round.next() else {
            return Err(SeasonError::InvariantViolation(format!("{} has no following round", round)));
        };

        match schedule.resolve_placeholders(next, &winners, &self.seeds) {
            Ok(filled) => debug!("{} → {}: {} slots filled", round, next, filled),
            Err(SeasonError::InsufficientWinners { conference, expected, found, .. }) => {
                return Ok(AdvanceOutcome::Deferred(Diagnostic::RoundDeferred {
                    round,
                    reason: format!("{} has {} of {} winners", conference, found, expected),
                }));
            }
            Err(error) => return Err(error),
        }

        info!("🏈 {} {} complete, advancing to {}", self.year, round, next);

        self.winners.insert(round, winners.clone());
        self.stage = BracketStage::from_round(next);

        Ok(AdvanceOutcome::Advanced { round, winners })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{BoxScore, ScheduledGame};

    fn seeds() -> PlayoffSeeds {
        let mut seeds = PlayoffSeeds::default();
        seeds.insert("Atlas", (1..=7).map(TeamId).collect());
        seeds.insert("Nova", (11..=17).map(TeamId).collect());
        seeds
    }

    fn setup() -> (PlayoffBracket, Schedule) {
        let bracket = PlayoffBracket::new(2025, seeds());
        let mut schedule = Schedule::new(2025);
        bracket.materialize(&mut schedule, &CalendarSettings::default()).unwrap();
        (bracket, schedule)
    }

    /// Plays every game of `round`, the home team winning unless listed in
    /// `upsets`.
    fn play(schedule: &mut Schedule, round: PlayoffRound, upsets: &[u32]) -> Vec<GameResult> {
        let games: Vec<ScheduledGame> = schedule.playoff_games(round).into_iter().cloned().collect();

        games
            .iter()
            .map(|game| {
                let (home, away) = game.teams().unwrap();
                let score = if upsets.contains(&away.0) { BoxScore::new(10, 20) } else { BoxScore::new(20, 10) };
                schedule.record_result(&game.id, score).unwrap();
                schedule.game(&game.id).unwrap().to_result().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_full_bracket_produces_champion() {
        let (mut bracket, mut schedule) = setup();
        assert_eq!(schedule.playoff_games(PlayoffRound::WildCard).len(), 6);

        let results = play(&mut schedule, PlayoffRound::WildCard, &[7]);
        assert!(matches!(bracket.advance_round(&results, &mut schedule).unwrap(), AdvanceOutcome::Advanced { .. }));
        assert_eq!(bracket.stage(), BracketStage::Divisional);

        let divisional = schedule.game("2025-DIV-Atlas-1").unwrap();
        assert_eq!(divisional.teams(), Some((TeamId(1), TeamId(7))));

        let results = play(&mut schedule, PlayoffRound::Divisional, &[7]);
        bracket.advance_round(&results, &mut schedule).unwrap();

        let results = play(&mut schedule, PlayoffRound::ConferenceChampionship, &[]);
        bracket.advance_round(&results, &mut schedule).unwrap();
        assert_eq!(bracket.winners(PlayoffRound::ConferenceChampionship), &[TeamId(3), TeamId(11)]);

        let final_game = schedule.game("2025-FINAL").unwrap();
        assert_eq!(final_game.teams(), Some((TeamId(11), TeamId(3))));

        let results = play(&mut schedule, PlayoffRound::FinalBowl, &[3]);
        assert_eq!(
            bracket.advance_round(&results, &mut schedule).unwrap(),
            AdvanceOutcome::Completed { champion: TeamId(3), runner_up: TeamId(11) }
        );
        assert!(bracket.is_complete());
        assert_eq!(bracket.advance_round(&[], &mut schedule).unwrap(), AdvanceOutcome::AlreadyComplete);
    }

    #[test]
    fn test_incomplete_round_is_deferred() {
        let (mut bracket, mut schedule) = setup();
        let before = schedule.clone();

        let mut results = play(&mut schedule, PlayoffRound::WildCard, &[]);
        results.pop();

        let outcome = bracket.advance_round(&results, &mut schedule).unwrap();

        assert!(matches!(outcome, AdvanceOutcome::Deferred(Diagnostic::RoundDeferred { .. })));
        assert_eq!(bracket.stage(), BracketStage::WildCard);
        assert_eq!(
            schedule.playoff_games(PlayoffRound::Divisional),
            before.playoff_games(PlayoffRound::Divisional)
        );
    }

    #[test]
    fn test_tied_playoff_game_is_not_advanced() {
        let (mut bracket, mut schedule) = setup();

        let mut results = play(&mut schedule, PlayoffRound::WildCard, &[]);
        results[0].score = BoxScore::new(17, 17);

        let outcome = bracket.advance_round(&results, &mut schedule).unwrap();

        assert!(matches!(outcome, AdvanceOutcome::Deferred(Diagnostic::TiedPlayoffGame { .. })));
        assert_eq!(bracket.stage(), BracketStage::WildCard);
    }
}
