use crate::league::{GameLine, GameOutcome, GameResult, StandingsRecord, TeamOutcome};
use crate::{SeasonError, SeasonResult, TeamId, TeamRegistry};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running regular-season records plus the append-only log of every game
/// applied. The log is the source for head-to-head and common-game data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsLedger {
    records: BTreeMap<TeamId, StandingsRecord>,
    games: Vec<GameResult>,
}

impl StandingsLedger {
    pub fn new(registry: &TeamRegistry) -> Self {
        let records = registry
            .teams()
            .map(|team| (team.id, StandingsRecord::new(team.id, &team.conference, &team.division)))
            .collect();

        StandingsLedger {
            records,
            games: Vec::new(),
        }
    }

    /// Updates both participants. The ledger does not deduplicate: callers
    /// apply each result exactly once.
    pub fn apply_result(&mut self, result: &GameResult) -> SeasonResult<()> {
        if result.home == result.away {
            return Err(SeasonError::SelfMatch(result.home));
        }

        let home = self.records.get(&result.home).ok_or(SeasonError::UnknownTeam(result.home))?;
        let away = self.records.get(&result.away).ok_or(SeasonError::UnknownTeam(result.away))?;

        let same_conference = home.conference == away.conference;
        let same_division = same_conference && home.division == away.division;

        let (home_outcome, away_outcome) = match result.outcome() {
            GameOutcome::HomeWin => (TeamOutcome::Win, TeamOutcome::Loss),
            GameOutcome::AwayWin => (TeamOutcome::Loss, TeamOutcome::Win),
            GameOutcome::Tie => (TeamOutcome::Tie, TeamOutcome::Tie),
        };

        let score = result.score;
        let lines = [
            (
                result.home,
                GameLine {
                    opponent: result.away,
                    outcome: home_outcome,
                    points_for: score.home_score as u32,
                    points_against: score.away_score as u32,
                    touchdowns_for: score.home_touchdowns as u32,
                    touchdowns_against: score.away_touchdowns as u32,
                    same_division,
                    same_conference,
                },
            ),
            (
                result.away,
                GameLine {
                    opponent: result.home,
                    outcome: away_outcome,
                    points_for: score.away_score as u32,
                    points_against: score.home_score as u32,
                    touchdowns_for: score.away_touchdowns as u32,
                    touchdowns_against: score.home_touchdowns as u32,
                    same_division,
                    same_conference,
                },
            ),
        ];

        for (team, line) in lines {
            if let Some(record) = self.records.get_mut(&team) {
                record.apply(&line);
            }
        }

        debug!(
            "standings: {} {} - {} {}",
            result.home, score.home_score, score.away_score, result.away
        );

        self.games.push(result.clone());

        Ok(())
    }

    pub fn record(&self, team: TeamId) -> Option<&StandingsRecord> {
        self.records.get(&team)
    }

    pub fn records(&self) -> impl Iterator<Item = &StandingsRecord> {
        self.records.values()
    }

    pub fn teams(&self) -> Vec<TeamId> {
        self.records.keys().copied().collect()
    }

    pub fn games(&self) -> &[GameResult] {
        &self.games
    }

    pub fn games_for(&self, team: TeamId) -> impl Iterator<Item = &GameResult> {
        self.games.iter().filter(move |game| game.involves(team))
    }

    pub fn win_pct(&self, team: TeamId) -> f64 {
        self.records.get(&team).map(|record| record.win_pct()).unwrap_or(0.0)
    }

    pub fn conference_teams(&self, conference: &str) -> Vec<TeamId> {
        self.records
            .values()
            .filter(|record| record.conference == conference)
            .map(|record| record.team)
            .collect()
    }

    /// Pre-tie-break order within each conference: wins desc, losses asc,
    /// ties desc. Equal records keep ascending team order.
    pub fn sorted_by_conference(&self) -> BTreeMap<String, Vec<TeamId>> {
        let mut conferences: BTreeMap<String, Vec<&StandingsRecord>> = BTreeMap::new();

        for record in self.records.values() {
            conferences.entry(record.conference.clone()).or_default().push(record);
        }

        conferences
            .into_iter()
            .map(|(conference, mut records)| {
                records.sort_by(|a, b| {
                    b.wins
                        .cmp(&a.wins)
                        .then(a.losses.cmp(&b.losses))
                        .then(b.ties.cmp(&a.ties))
                });

                (conference, records.into_iter().map(|record| record.team).collect())
            })
            .collect()
    }

    /// Zeroes every record and clears the game log for a new season.
    pub fn reset(&mut self) {
        for record in self.records.values_mut() {
            record.reset();
        }
        self.games.clear();
    }

    /// Checks that every record matches the game log and that wins and
    /// losses balance league-wide.
    pub fn validate(&self) -> SeasonResult<()> {
        let mut total_wins = 0u64;
        let mut total_losses = 0u64;
        let mut total_ties = 0u64;

        for record in self.records.values() {
            let logged = self.games_for(record.team).count() as u32;

            if record.games_played() != logged {
                return Err(SeasonError::InvariantViolation(format!(
                    "team {} has {} decisions but {} logged games",
                    record.team,
                    record.games_played(),
                    logged
                )));
            }

            total_wins += record.wins as u64;
            total_losses += record.losses as u64;
            total_ties += record.ties as u64;
        }

        let tied_games = self.games.iter().filter(|game| game.is_tie()).count() as u64;

        if total_wins != total_losses || total_ties != 2 * tied_games {
            return Err(SeasonError::InvariantViolation(format!(
                "league totals out of balance: {} wins, {} losses, {} ties over {} tied games",
                total_wins, total_losses, total_ties, tied_games
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn record_mut(&mut self, team: TeamId) -> Option<&mut StandingsRecord> {
        self.records.get_mut(&team)
    }
}
