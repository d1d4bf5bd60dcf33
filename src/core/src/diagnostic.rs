use crate::{PlayoffRound, TeamId};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conditions the core chose to skip, defer or default instead of guessing.
/// Every diagnostic is also logged at `warn` level when reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    DataQuality { team: TeamId, message: String },
    UnresolvedPlaceholder { game_id: String },
    MissingResult { game_id: String },
    TiedPlayoffGame { game_id: String },
    RoundDeferred { round: PlayoffRound, reason: String },
    SeedingDeferred { reason: String },
    InvariantViolation { message: String },
    ScheduleRegenerated { reason: String },
    SeasonUnfinished { year: i32, reason: String },
}

impl Diagnostic {
    pub fn report(&self) {
        warn!("⚠️ {}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DataQuality { team, message } => write!(f, "data quality ({}): {}", team, message),
            Diagnostic::UnresolvedPlaceholder { game_id } => {
                write!(f, "game {} still has an unresolved placeholder", game_id)
            }
            Diagnostic::MissingResult { game_id } => write!(f, "game {} has no result yet", game_id),
            Diagnostic::TiedPlayoffGame { game_id } => {
                write!(f, "playoff game {} ended tied, result not accepted", game_id)
            }
            Diagnostic::RoundDeferred { round, reason } => write!(f, "{} deferred: {}", round, reason),
            Diagnostic::SeedingDeferred { reason } => write!(f, "playoff seeding deferred: {}", reason),
            Diagnostic::InvariantViolation { message } => write!(f, "invariant violation: {}", message),
            Diagnostic::ScheduleRegenerated { reason } => write!(f, "schedule regenerated: {}", reason),
            Diagnostic::SeasonUnfinished { year, reason } => write!(f, "season {} ended early: {}", year, reason),
        }
    }
}
