use crate::calendar::CalendarState;
use crate::league::{PlayoffBracket, Schedule, StandingsLedger};
use crate::{ChampionRecord, SeasonArchive, SeasonResult, SeasonSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable state of a season. Team identities are not included; a
/// snapshot is restored against the registry that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    pub settings: SeasonSettings,
    pub calendar: CalendarState,
    pub schedule: Schedule,
    pub ledger: StandingsLedger,
    pub bracket: Option<PlayoffBracket>,
    pub champions: Vec<ChampionRecord>,
    #[serde(default)]
    pub archives: Vec<SeasonArchive>,
    #[serde(default)]
    pub attempts: BTreeMap<String, u32>,
    #[serde(default)]
    pub seeding_blocked: bool,
}

impl SeasonSnapshot {
    pub fn to_json(&self) -> SeasonResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SeasonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
