use crate::PlayoffRound;
use crate::TeamId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeasonError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("duplicate team identity: {0}")]
    DuplicateTeam(TeamId),

    #[error("team {0} cannot play itself")]
    SelfMatch(TeamId),

    #[error("standings invariant violated: {0}")]
    InvariantViolation(String),

    #[error("conference {conference} has {found} teams, {required} are needed to seed the playoffs")]
    NotEnoughTeams {
        conference: String,
        found: usize,
        required: usize,
    },

    #[error("{round} needs {expected} winners in {conference}, only {found} available")]
    InsufficientWinners {
        round: PlayoffRound,
        conference: String,
        expected: usize,
        found: usize,
    },

    #[error("no scheduled game with id {0}")]
    UnknownGame(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type SeasonResult<T> = Result<T, SeasonError>;
