use crate::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossTie {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl WinLossTie {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Ties count as half a win. Zero games is a 0.0 percentage.
    pub fn pct(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }

        (self.wins as f64 + 0.5 * self.ties as f64) / games as f64
    }

    pub fn add(&mut self, outcome: TeamOutcome) {
        match outcome {
            TeamOutcome::Win => self.wins += 1,
            TeamOutcome::Loss => self.losses += 1,
            TeamOutcome::Tie => self.ties += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamOutcome {
    Win,
    Loss,
    Tie,
}

/// One side of a completed game, from the perspective of the team being
/// updated.
#[derive(Debug, Clone, Copy)]
pub struct GameLine {
    pub opponent: TeamId,
    pub outcome: TeamOutcome,
    pub points_for: u32,
    pub points_against: u32,
    pub touchdowns_for: u32,
    pub touchdowns_against: u32,
    pub same_division: bool,
    pub same_conference: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRecord {
    pub team: TeamId,
    pub conference: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub division_record: WinLossTie,
    pub conference_record: WinLossTie,
    pub net_touchdowns: i32,
    pub opponents: BTreeSet<TeamId>,
    pub defeated: Vec<TeamId>,
}

impl StandingsRecord {
    pub fn new(team: TeamId, conference: &str, division: &str) -> Self {
        StandingsRecord {
            team,
            conference: conference.to_string(),
            division: division.to_string(),
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
            division_record: WinLossTie::default(),
            conference_record: WinLossTie::default(),
            net_touchdowns: 0,
            opponents: BTreeSet::new(),
            defeated: Vec::new(),
        }
    }

    pub fn overall(&self) -> WinLossTie {
        WinLossTie {
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn win_pct(&self) -> f64 {
        self.overall().pct()
    }

    pub fn net_points(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    pub fn apply(&mut self, line: &GameLine) {
        match line.outcome {
            TeamOutcome::Win => {
                self.wins += 1;
                self.defeated.push(line.opponent);
            }
            TeamOutcome::Loss => self.losses += 1,
            TeamOutcome::Tie => self.ties += 1,
        }

        if line.same_division {
            self.division_record.add(line.outcome);
        }
        if line.same_conference {
            self.conference_record.add(line.outcome);
        }

        self.points_for += line.points_for;
        self.points_against += line.points_against;
        self.net_touchdowns += line.touchdowns_for as i32 - line.touchdowns_against as i32;
        self.opponents.insert(line.opponent);
    }

    pub fn reset(&mut self) {
        *self = StandingsRecord::new(self.team, &self.conference, &self.division);
    }
}
