use crate::league::GameKind;
use crate::{PlayoffRound, TeamId};
use serde::{Deserialize, Serialize};

/// Final score as produced by a game simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub home_score: u16,
    pub away_score: u16,
    pub home_touchdowns: u16,
    pub away_touchdowns: u16,
}

impl BoxScore {
    pub fn new(home_score: u16, away_score: u16) -> Self {
        BoxScore {
            home_score,
            away_score,
            home_touchdowns: home_score / 7,
            away_touchdowns: away_score / 7,
        }
    }

    pub fn with_touchdowns(mut self, home_touchdowns: u16, away_touchdowns: u16) -> Self {
        self.home_touchdowns = home_touchdowns;
        self.away_touchdowns = away_touchdowns;
        self
    }

    pub fn is_tie(&self) -> bool {
        self.home_score == self.away_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    HomeWin,
    AwayWin,
    Tie,
}

/// An immutable completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: String,
    pub home: TeamId,
    pub away: TeamId,
    pub score: BoxScore,
    pub week: u8,
    pub kind: GameKind,
    pub round: Option<PlayoffRound>,
    pub conference: Option<String>,
}

impl GameResult {
    pub fn new(game_id: &str, home: TeamId, away: TeamId, score: BoxScore, week: u8, kind: GameKind) -> Self {
        GameResult {
            game_id: game_id.to_string(),
            home,
            away,
            score,
            week,
            kind,
            round: None,
            conference: None,
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.score.home_score.cmp(&self.score.away_score) {
            std::cmp::Ordering::Greater => GameOutcome::HomeWin,
            std::cmp::Ordering::Less => GameOutcome::AwayWin,
            std::cmp::Ordering::Equal => GameOutcome::Tie,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.outcome() == GameOutcome::Tie
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.outcome() {
            GameOutcome::HomeWin => Some(self.home),
            GameOutcome::AwayWin => Some(self.away),
            GameOutcome::Tie => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        match self.outcome() {
            GameOutcome::HomeWin => Some(self.away),
            GameOutcome::AwayWin => Some(self.home),
            GameOutcome::Tie => None,
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.home == team {
            Some(self.away)
        } else if self.away == team {
            Some(self.home)
        } else {
            None
        }
    }

    /// (points scored, points allowed) from `team`'s side.
    pub fn points_for(&self, team: TeamId) -> Option<(u32, u32)> {
        if self.home == team {
            Some((self.score.home_score as u32, self.score.away_score as u32))
        } else if self.away == team {
            Some((self.score.away_score as u32, self.score.home_score as u32))
        } else {
            None
        }
    }
}
