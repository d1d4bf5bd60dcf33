use crate::calendar::{OffseasonPhase, PlayoffRound, SeasonPhase, WeekRange};
use crate::{SeasonError, SeasonResult};
use serde::{Deserialize, Serialize};

const DEFAULT_WEEKS_IN_YEAR: u8 = 52;
const DEFAULT_DAYS_IN_WEEK: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffseasonWindow {
    pub weeks: WeekRange,
    pub phase: OffseasonPhase,
}

/// Static week table the calendar derives every phase from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub weeks_in_year: u8,
    pub days_in_week: u8,
    pub preseason: WeekRange,
    pub bye_week: Option<u8>,
    pub regular_season: WeekRange,
    pub playoffs: WeekRange,
    pub offseason: WeekRange,
    pub offseason_phases: Vec<OffseasonWindow>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            weeks_in_year: DEFAULT_WEEKS_IN_YEAR,
            days_in_week: DEFAULT_DAYS_IN_WEEK,
            preseason: WeekRange::new(1, 4),
            bye_week: Some(4),
            regular_season: WeekRange::new(5, 22),
            playoffs: WeekRange::new(23, 26),
            offseason: WeekRange::new(27, 52),
            offseason_phases: vec![
                OffseasonWindow { weeks: WeekRange::new(27, 28), phase: OffseasonPhase::PostseasonWrapUp },
                OffseasonWindow { weeks: WeekRange::new(29, 30), phase: OffseasonPhase::Combine },
                OffseasonWindow { weeks: WeekRange::new(31, 34), phase: OffseasonPhase::FreeAgency },
                OffseasonWindow { weeks: WeekRange::new(35, 36), phase: OffseasonPhase::RookieCamp },
                OffseasonWindow { weeks: WeekRange::new(37, 40), phase: OffseasonPhase::Minicamp },
                OffseasonWindow { weeks: WeekRange::new(41, 52), phase: OffseasonPhase::DeadPeriod },
            ],
        }
    }
}

impl CalendarSettings {
    pub fn phase_for_week(&self, week: u8) -> SeasonPhase {
        if self.preseason.contains(week) {
            SeasonPhase::Preseason
        } else if self.regular_season.contains(week) {
            SeasonPhase::RegularSeason
        } else if self.playoffs.contains(week) {
            SeasonPhase::Playoffs
        } else {
            SeasonPhase::Offseason
        }
    }

    pub fn playoff_round_for_week(&self, week: u8) -> Option<PlayoffRound> {
        if !self.playoffs.contains(week) {
            return None;
        }

        PlayoffRound::from_index((week - self.playoffs.start) as usize)
    }

    pub fn week_of_round(&self, round: PlayoffRound) -> u8 {
        self.playoffs.start + round.index() as u8
    }

    pub fn offseason_phase_for_week(&self, week: u8) -> Option<OffseasonPhase> {
        if !self.offseason.contains(week) {
            return None;
        }

        self.offseason_phases
            .iter()
            .find(|window| window.weeks.contains(week))
            .map(|window| window.phase)
    }

    pub fn last_regular_season_week(&self) -> u8 {
        self.regular_season.end
    }

    pub fn is_bye_week(&self, week: u8) -> bool {
        self.bye_week == Some(week)
    }

    /// The phase ranges must be ordered, contiguous and cover the whole year.
    pub fn validate(&self) -> SeasonResult<()> {
        if self.days_in_week == 0 || self.days_in_week > 7 {
            return Err(SeasonError::Configuration(format!(
                "days_in_week must be within 1..=7, got {}",
                self.days_in_week
            )));
        }

        let ranges = [
            ("preseason", self.preseason),
            ("regular_season", self.regular_season),
            ("playoffs", self.playoffs),
            ("offseason", self.offseason),
        ];

        let mut expected_start = 1u8;
        for (name, range) in ranges {
            if range.is_empty() {
                return Err(SeasonError::Configuration(format!("{} range is empty", name)));
            }
            if range.start != expected_start {
                return Err(SeasonError::Configuration(format!(
                    "{} must start at week {}, starts at {}",
                    name, expected_start, range.start
                )));
            }
            expected_start = range.end.saturating_add(1);
        }

        if self.offseason.end != self.weeks_in_year {
            return Err(SeasonError::Configuration(format!(
                "offseason must end at week {}, ends at {}",
                self.weeks_in_year, self.offseason.end
            )));
        }

        if self.playoffs.len() != PlayoffRound::ALL.len() {
            return Err(SeasonError::Configuration(format!(
                "playoffs must span {} weeks, spans {}",
                PlayoffRound::ALL.len(),
                self.playoffs.len()
            )));
        }

        if let Some(bye) = self.bye_week {
            if !self.preseason.contains(bye) {
                return Err(SeasonError::Configuration(format!(
                    "bye week {} lies outside the preseason",
                    bye
                )));
            }
        }

        let mut windows: Vec<&OffseasonWindow> = self.offseason_phases.iter().collect();
        windows.sort_by_key(|window| window.weeks.start);
        for pair in windows.windows(2) {
            if pair[0].weeks.end >= pair[1].weeks.start {
                return Err(SeasonError::Configuration(format!(
                    "offseason windows {} and {} overlap",
                    pair[0].phase, pair[1].phase
                )));
            }
        }
        if let Some(window) = windows.iter().find(|w| !(self.offseason.contains(w.weeks.start) && self.offseason.contains(w.weeks.end))) {
            return Err(SeasonError::Configuration(format!(
                "offseason window {} lies outside the offseason",
                window.phase
            )));
        }

        Ok(())
    }
}
