use gridiron_core::{SeasonError, SeasonResult};
use serde::Deserialize;

const STATIC_LEAGUE_JSON: &str = include_str!("../data/league.json");

#[derive(Deserialize)]
pub struct LeagueEntity {
    #[serde(default)]
    pub settings: SettingsEntity,
    pub teams: Vec<TeamEntity>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsEntity {
    pub start_year: Option<i32>,
    pub seed: Option<u64>,
    pub default_conference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntity {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub conference: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load() -> SeasonResult<LeagueEntity> {
        Self::parse(STATIC_LEAGUE_JSON)
    }

    pub fn parse(json: &str) -> SeasonResult<LeagueEntity> {
        serde_json::from_str(json).map_err(|error| SeasonError::Configuration(format!("league data: {}", error)))
    }
}
