use crate::calendar::{CalendarSettings, OffseasonPhase, PlayoffRound, SeasonPhase};
use crate::SeasonResult;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// League weeks run Tuesday through Monday, so Monday night closes a week.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
];

pub fn day_index(day: Weekday) -> u8 {
    WEEK_DAYS.iter().position(|d| *d == day).unwrap_or(0) as u8
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub year: i32,
    pub week: u8,
    pub day: u8,
    pub phase: SeasonPhase,
    pub playoff_round: Option<PlayoffRound>,
    pub offseason_phase: Option<OffseasonPhase>,
}

/// What a single `advance_day` crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTransition {
    SameWeek,
    NewWeek { previous_week: u8 },
    NewYear { previous_year: i32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayInfo {
    pub year: i32,
    pub phase: SeasonPhase,
    pub label: String,
    pub day_name: &'static str,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    settings: CalendarSettings,
    state: CalendarState,
}

impl Calendar {
    pub fn new(year: i32, settings: CalendarSettings) -> SeasonResult<Self> {
        settings.validate()?;

        let mut calendar = Calendar {
            settings,
            state: CalendarState {
                year,
                week: 1,
                day: 0,
                phase: SeasonPhase::Preseason,
                playoff_round: None,
                offseason_phase: None,
            },
        };
        calendar.update_phase();

        Ok(calendar)
    }

    /// Rebuilds a calendar from persisted state. Phase fields are re-derived
    /// from the week so a stale snapshot cannot disagree with the table.
    pub fn restore(state: CalendarState, settings: CalendarSettings) -> SeasonResult<Self> {
        settings.validate()?;

        let mut calendar = Calendar { settings, state };
        calendar.state.week = calendar.state.week.clamp(1, calendar.settings.weeks_in_year);
        calendar.state.day = calendar.state.day.min(calendar.settings.days_in_week - 1);
        calendar.update_phase();

        Ok(calendar)
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn year(&self) -> i32 {
        self.state.year
    }

    pub fn week(&self) -> u8 {
        self.state.week
    }

    pub fn day(&self) -> u8 {
        self.state.day
    }

    pub fn phase(&self) -> SeasonPhase {
        self.state.phase
    }

    pub fn weekday(&self) -> Weekday {
        WEEK_DAYS[self.state.day as usize % WEEK_DAYS.len()]
    }

    pub fn advance_day(&mut self) -> DayTransition {
        self.state.day += 1;

        if self.state.day < self.settings.days_in_week {
            return DayTransition::SameWeek;
        }

        self.state.day = 0;
        let previous_week = self.state.week;
        self.state.week += 1;

        if self.state.week > self.settings.weeks_in_year {
            let previous_year = self.state.year;

            self.state.year += 1;
            self.state.week = 1;
            self.state.phase = SeasonPhase::Preseason;
            self.state.playoff_round = None;
            self.state.offseason_phase = None;
            self.update_phase();

            info!("📅 new league year {} begins", self.state.year);

            return DayTransition::NewYear { previous_year };
        }

        let previous_phase = self.state.phase;
        self.update_phase();

        if previous_phase != self.state.phase {
            info!("📅 {} week {}: entering {}", self.state.year, self.state.week, self.state.phase);
        } else {
            debug!("📅 {} week {}", self.state.year, self.state.week);
        }

        DayTransition::NewWeek { previous_week }
    }

    pub fn is_regular_season_over(&self) -> bool {
        self.state.week > self.settings.last_regular_season_week()
    }

    pub fn is_bye_week(&self) -> bool {
        self.settings.is_bye_week(self.state.week)
    }

    /// First Tuesday after Labor Day (first Monday of September).
    pub fn season_start_date(year: i32) -> Option<NaiveDate> {
        let first_of_september = NaiveDate::from_ymd_opt(year, 9, 1)?;
        let to_monday = (7 - first_of_september.weekday().num_days_from_monday()) % 7;
        let labor_day = first_of_september + Duration::days(to_monday as i64);

        Some(labor_day + Duration::days(1))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        let start = Self::season_start_date(self.state.year)?;
        let offset = (self.state.week as i64 - 1) * self.settings.days_in_week as i64 + self.state.day as i64;

        Some(start + Duration::days(offset))
    }

    pub fn week_label(&self) -> String {
        let week = self.state.week;

        match self.state.phase {
            SeasonPhase::Preseason if self.settings.is_bye_week(week) => String::from("Bye Week"),
            SeasonPhase::Preseason => format!("Preseason Week {}", self.settings.preseason.ordinal(week)),
            SeasonPhase::RegularSeason => {
                format!("Regular Season Week {}", self.settings.regular_season.ordinal(week))
            }
            SeasonPhase::Playoffs => match self.state.playoff_round {
                Some(round) => round.name().to_string(),
                None => String::from("Playoffs"),
            },
            SeasonPhase::Offseason => match self.state.offseason_phase {
                Some(sub_phase) => format!("Offseason: {}", sub_phase),
                None => String::from("Offseason"),
            },
        }
    }

    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            year: self.state.year,
            phase: self.state.phase,
            label: self.week_label(),
            day_name: day_name(self.weekday()),
            date: self.date(),
        }
    }

    fn update_phase(&mut self) {
        let week = self.state.week;

        self.state.phase = self.settings.phase_for_week(week);

        match self.state.phase {
            SeasonPhase::Playoffs => {
                self.state.playoff_round = self.settings.playoff_round_for_week(week);
                self.state.offseason_phase = None;
            }
            SeasonPhase::Offseason => {
                self.state.playoff_round = None;
                self.state.offseason_phase = self.settings.offseason_phase_for_week(week);
            }
            _ => {
                self.state.playoff_round = None;
                self.state.offseason_phase = None;
            }
        }
    }
}
