use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonPhase {
    Preseason,
    RegularSeason,
    Playoffs,
    Offseason,
}

impl SeasonPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SeasonPhase::Preseason => "Preseason",
            SeasonPhase::RegularSeason => "Regular Season",
            SeasonPhase::Playoffs => "Playoffs",
            SeasonPhase::Offseason => "Offseason",
        }
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Playoff rounds in the order they are played. Each round occupies one
/// week of the playoff window, starting with the Wild Card round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayoffRound {
    WildCard,
    Divisional,
    ConferenceChampionship,
    FinalBowl,
}

impl PlayoffRound {
    pub const ALL: [PlayoffRound; 4] = [
        PlayoffRound::WildCard,
        PlayoffRound::Divisional,
        PlayoffRound::ConferenceChampionship,
        PlayoffRound::FinalBowl,
    ];

    pub fn from_index(index: usize) -> Option<PlayoffRound> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            PlayoffRound::WildCard => 0,
            PlayoffRound::Divisional => 1,
            PlayoffRound::ConferenceChampionship => 2,
            PlayoffRound::FinalBowl => 3,
        }
    }

    pub fn next(&self) -> Option<PlayoffRound> {
        Self::from_index(self.index() + 1)
    }

    /// Games played in this round by a single conference. The final is
    /// league-wide and counted separately.
    pub fn games_per_conference(&self) -> usize {
        match self {
            PlayoffRound::WildCard => 3,
            PlayoffRound::Divisional => 2,
            PlayoffRound::ConferenceChampionship => 1,
            PlayoffRound::FinalBowl => 0,
        }
    }

    pub fn expected_games(&self, conferences: usize) -> usize {
        match self {
            PlayoffRound::FinalBowl => 1,
            round => round.games_per_conference() * conferences,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayoffRound::WildCard => "Wild Card Round",
            PlayoffRound::Divisional => "Divisional Round",
            PlayoffRound::ConferenceChampionship => "Conference Championship",
            PlayoffRound::FinalBowl => "Gridiron Bowl",
        }
    }
}

impl fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffseasonPhase {
    PostseasonWrapUp,
    Combine,
    FreeAgency,
    RookieCamp,
    Minicamp,
    DeadPeriod,
}

impl OffseasonPhase {
    pub fn name(&self) -> &'static str {
        match self {
            OffseasonPhase::PostseasonWrapUp => "Postseason Wrap-Up",
            OffseasonPhase::Combine => "Combine",
            OffseasonPhase::FreeAgency => "Free Agency",
            OffseasonPhase::RookieCamp => "Rookie Camp",
            OffseasonPhase::Minicamp => "Minicamp",
            OffseasonPhase::DeadPeriod => "Dead Period",
        }
    }
}

impl fmt::Display for OffseasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive range of week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: u8,
    pub end: u8,
}

impl WeekRange {
    pub const fn new(start: u8, end: u8) -> Self {
        WeekRange { start, end }
    }

    #[inline]
    pub fn contains(&self, week: u8) -> bool {
        week >= self.start && week <= self.end
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn weeks(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }

    /// 1-based position of `week` inside the range.
    pub fn ordinal(&self, week: u8) -> u8 {
        week.saturating_sub(self.start) + 1
    }
}
