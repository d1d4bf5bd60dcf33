pub mod generators;
pub mod loaders;

pub use generators::*;
pub use loaders::*;

use gridiron_core::SeasonResult;
use log::info;

pub struct DatabaseEntity {
    pub settings: SettingsEntity,
    pub teams: Vec<TeamEntity>,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> SeasonResult<DatabaseEntity> {
        let league = LeagueLoader::load()?;

        info!("📂 loaded {} teams", league.teams.len());

        Ok(DatabaseEntity {
            settings: league.settings,
            teams: league.teams,
        })
    }
}
