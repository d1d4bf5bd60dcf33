use crate::calendar::CalendarSettings;
use crate::{SeasonError, SeasonResult};
use serde::{Deserialize, Serialize};

const DEFAULT_START_YEAR: i32 = 2025;
const DEFAULT_SEED: u64 = 0x4752_4944_4952_4f4e;
const DEFAULT_CONFERENCE: &str = "Nova";
const DEFAULT_MAX_DAYS_PER_RUN: usize = 7 * 52 * 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    pub start_year: i32,
    pub seed: u64,
    pub default_conference: String,
    /// Step cap for `advance_until` style runs.
    pub max_days_per_run: usize,
    pub calendar: CalendarSettings,
}

impl Default for SeasonSettings {
    fn default() -> Self {
        SeasonSettings {
            start_year: DEFAULT_START_YEAR,
            seed: DEFAULT_SEED,
            default_conference: String::from(DEFAULT_CONFERENCE),
            max_days_per_run: DEFAULT_MAX_DAYS_PER_RUN,
            calendar: CalendarSettings::default(),
        }
    }
}

impl SeasonSettings {
    pub fn with_year(mut self, year: i32) -> Self {
        self.start_year = year;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> SeasonResult<()> {
        if self.default_conference.trim().is_empty() {
            return Err(SeasonError::Configuration(String::from("default conference is empty")));
        }
        if self.max_days_per_run == 0 {
            return Err(SeasonError::Configuration(String::from("max_days_per_run must be positive")));
        }

        self.calendar.validate()
    }
}
