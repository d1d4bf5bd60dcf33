use crate::calendar::{DayTransition, DisplayInfo};
use crate::league::{GameResult, PlayoffSeeds};
use crate::{Diagnostic, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionRecord {
    pub year: i32,
    pub champion: TeamId,
    pub runner_up: TeamId,
}

/// Final state of a finished league year, kept after the rollover clears the
/// live standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonArchive {
    pub year: i32,
    pub champion: Option<ChampionRecord>,
    pub seeds: Option<PlayoffSeeds>,
    /// Conference name to teams by (wins, losses, ties).
    pub standings: BTreeMap<String, Vec<TeamId>>,
    pub games_played: usize,
}

/// Everything one simulated day produced.
#[derive(Debug, Clone)]
pub struct SeasonDayResult {
    pub year: i32,
    pub week: u8,
    pub day: u8,
    pub results: Vec<GameResult>,
    pub seeds: Option<PlayoffSeeds>,
    pub champion: Option<ChampionRecord>,
    pub archived: Option<SeasonArchive>,
    pub diagnostics: Vec<Diagnostic>,
    pub transition: DayTransition,
    pub display: DisplayInfo,
}

/// Totals of a multi-day run.
#[derive(Debug, Clone, Default)]
pub struct AdvanceSummary {
    pub days: usize,
    pub games: usize,
    pub champions: Vec<ChampionRecord>,
    pub archives: Vec<SeasonArchive>,
    pub diagnostics: Vec<Diagnostic>,
    /// False when the step cap stopped the run before its target.
    pub reached: bool,
}

impl AdvanceSummary {
    pub fn add(&mut self, day: SeasonDayResult) {
        self.days += 1;
        self.games += day.results.len();
        self.champions.extend(day.champion);
        self.archives.extend(day.archived);
        self.diagnostics.extend(day.diagnostics);
    }
}
