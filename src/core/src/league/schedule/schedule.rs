use crate::calendar::day_index;
use crate::league::{BoxScore, GameResult};
use crate::{PlayoffRound, SeasonError, SeasonResult, TeamId, TeamRegistry};
use chrono::{NaiveTime, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Preseason,
    RegularSeason,
    Playoff,
}

/// Resolution policy for a playoff slot whose team is not known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    LowestSeedWinner,
    HighSeedHost,
    OtherWinner,
    ChampionshipHost,
    ChampionshipVisitor,
    FinalHost,
    FinalVisitor,
}

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::LowestSeedWinner => "TBD_LowestSeedWinner",
            Placeholder::HighSeedHost => "TBD_HighSeedHost",
            Placeholder::OtherWinner => "TBD_OtherWinner",
            Placeholder::ChampionshipHost => "TBD_CC_Host",
            Placeholder::ChampionshipVisitor => "TBD_CC_Away",
            Placeholder::FinalHost => "TBD_Final_Host",
            Placeholder::FinalVisitor => "TBD_Final_Away",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Team(TeamId),
    Placeholder(Placeholder),
}

impl Participant {
    pub fn team(&self) -> Option<TeamId> {
        match self {
            Participant::Team(id) => Some(*id),
            Participant::Placeholder(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Participant::Team(_))
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Team(id) => write!(f, "{}", id),
            Participant::Placeholder(placeholder) => f.write_str(placeholder.token()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: String,
    pub home: Participant,
    pub away: Participant,
    pub week: u8,
    pub day: Weekday,
    pub kickoff: NaiveTime,
    pub kind: GameKind,
    pub round: Option<PlayoffRound>,
    pub conference: Option<String>,
    pub result: Option<BoxScore>,
}

impl ScheduledGame {
    pub fn new(id: String, home: TeamId, away: TeamId, week: u8, day: Weekday, kickoff: NaiveTime, kind: GameKind) -> Self {
        ScheduledGame {
            id,
            home: Participant::Team(home),
            away: Participant::Team(away),
            week,
            day,
            kickoff,
            kind,
            round: None,
            conference: None,
            result: None,
        }
    }

    pub fn is_playoff(&self) -> bool {
        self.kind == GameKind::Playoff
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.home.is_resolved() && self.away.is_resolved()
    }

    /// Both team ids, once every placeholder is resolved.
    pub fn teams(&self) -> Option<(TeamId, TeamId)> {
        Some((self.home.team()?, self.away.team()?))
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home.team() == Some(team) || self.away.team() == Some(team)
    }

    pub fn to_result(&self) -> Option<GameResult> {
        let (home, away) = self.teams()?;
        let score = self.result?;

        Some(GameResult {
            game_id: self.id.clone(),
            home,
            away,
            score,
            week: self.week,
            kind: self.kind,
            round: self.round,
            conference: self.conference.clone(),
        })
    }
}

/// Week number to the games scheduled in it, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub year: i32,
    weeks: BTreeMap<u8, Vec<ScheduledGame>>,
}

impl Schedule {
    pub fn new(year: i32) -> Self {
        Schedule {
            year,
            weeks: BTreeMap::new(),
        }
    }

    pub fn add_game(&mut self, game: ScheduledGame) {
        self.weeks.entry(game.week).or_default().push(game);
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.values().all(|games| games.is_empty())
    }

    pub fn len(&self) -> usize {
        self.weeks.values().map(|games| games.len()).sum()
    }

    pub fn games(&self) -> impl Iterator<Item = &ScheduledGame> {
        self.weeks.values().flatten()
    }

    pub fn games_mut(&mut self) -> impl Iterator<Item = &mut ScheduledGame> {
        self.weeks.values_mut().flatten()
    }

    pub fn games_for_week(&self, week: u8) -> &[ScheduledGame] {
        self.weeks.get(&week).map(|games| games.as_slice()).unwrap_or(&[])
    }

    /// Games on one day of a week, earliest kickoff first. Equal kickoffs keep
    /// their source order.
    pub fn games_for_day(&self, week: u8, day: Weekday) -> Vec<&ScheduledGame> {
        let mut games: Vec<&ScheduledGame> = self
            .games_for_week(week)
            .iter()
            .filter(|game| game.day == day)
            .collect();

        games.sort_by_key(|game| game.kickoff);
        games
    }

    pub fn games_for_team(&self, team: TeamId) -> Vec<&ScheduledGame> {
        self.games().filter(|game| game.involves(team)).collect()
    }

    pub fn game(&self, id: &str) -> Option<&ScheduledGame> {
        self.games().find(|game| game.id == id)
    }

    pub fn game_mut(&mut self, id: &str) -> Option<&mut ScheduledGame> {
        self.weeks.values_mut().flatten().find(|game| game.id == id)
    }

    pub fn record_result(&mut self, id: &str, score: BoxScore) -> SeasonResult<()> {
        let game = self
            .game_mut(id)
            .ok_or_else(|| SeasonError::UnknownGame(id.to_string()))?;

        debug!("recording {} {}-{} for game {}", game.home, score.home_score, score.away_score, id);

        game.result = Some(score);
        Ok(())
    }

    pub fn unplayed(&self, kind: GameKind) -> Vec<&ScheduledGame> {
        self.games()
            .filter(|game| game.kind == kind && !game.is_played())
            .collect()
    }

    pub fn playoff_games(&self, round: PlayoffRound) -> Vec<&ScheduledGame> {
        self.games()
            .filter(|game| game.is_playoff() && game.round == Some(round))
            .collect()
    }

    pub fn has_playoff_games(&self) -> bool {
        self.games().any(|game| game.is_playoff())
    }

    /// Unplayed games with resolved teams that are due by (`week`, `day`),
    /// ordered by week, day, kickoff and home team.
    pub fn due_games(&self, week: u8, day: Weekday) -> Vec<&ScheduledGame> {
        let today = day_index(day);

        let mut games: Vec<&ScheduledGame> = self
            .weeks
            .range(..=week)
            .flat_map(|(_, games)| games.iter())
            .filter(|game| !game.is_played() && game.is_resolved())
            .filter(|game| game.week < week || day_index(game.day) <= today)
            .collect();

        games.sort_by_key(|game| (game.week, day_index(game.day), game.kickoff, game.home.team()));
        games
    }

    /// Returns the first structural problem found: an unknown team, a team
    /// meeting itself, or a team booked twice in one non-playoff week.
    pub fn find_corruption(&self, registry: &TeamRegistry) -> Option<String> {
        for (week, games) in &self.weeks {
            let mut booked: HashSet<TeamId> = HashSet::new();

            for game in games {
                for participant in [game.home, game.away] {
                    if let Some(team) = participant.team() {
                        if !registry.contains(team) {
                            return Some(format!("game {} references unknown team {}", game.id, team));
                        }
                    }
                }

                if let Some((home, away)) = game.teams() {
                    if home == away {
                        return Some(format!("game {} pairs team {} with itself", game.id, home));
                    }

                    if !game.is_playoff() && (!booked.insert(home) || !booked.insert(away)) {
                        return Some(format!("week {} books a team twice (game {})", week, game.id));
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule() -> Schedule {
        let mut schedule = Schedule::new(2025);
        schedule.add_game(ScheduledGame::new("late".into(), TeamId(1), TeamId(2), 5, Weekday::Sun, time(20, 20), GameKind::RegularSeason));
        schedule.add_game(ScheduledGame::new("thu".into(), TeamId(3), TeamId(4), 5, Weekday::Thu, time(20, 15), GameKind::RegularSeason));
        schedule.add_game(ScheduledGame::new("early".into(), TeamId(5), TeamId(6), 5, Weekday::Sun, time(13, 0), GameKind::RegularSeason));
        schedule.add_game(ScheduledGame::new("early2".into(), TeamId(7), TeamId(8), 5, Weekday::Sun, time(13, 0), GameKind::RegularSeason));
        schedule
    }

    #[test]
    fn test_games_for_week_keeps_source_order() {
        let schedule = schedule();
        let ids: Vec<&str> = schedule.games_for_week(5).iter().map(|g| g.id.as_str()).collect();

        assert_eq!(ids, vec!["late", "thu", "early", "early2"]);
        assert!(schedule.games_for_week(6).is_empty());
    }

    #[test]
    fn test_games_for_day_sorted_by_kickoff_stable() {
        let schedule = schedule();
        let ids: Vec<&str> = schedule
            .games_for_day(5, Weekday::Sun)
            .iter()
            .map(|g| g.id.as_str())
            .collect();

        assert_eq!(ids, vec!["early", "early2", "late"]);
    }

    #[test]
    fn test_record_result_unknown_game() {
        let mut schedule = schedule();

        assert!(schedule.record_result("thu", BoxScore::new(21, 14)).is_ok());
        assert!(schedule.game("thu").unwrap().is_played());
        assert!(matches!(
            schedule.record_result("nope", BoxScore::new(0, 0)),
            Err(SeasonError::UnknownGame(_))
        ));
        assert_eq!(schedule.unplayed(GameKind::RegularSeason).len(), 3);
    }

    #[test]
    fn test_due_games_include_overdue_in_canonical_order() {
        let mut schedule = schedule();
        schedule.add_game(ScheduledGame::new("next".into(), TeamId(1), TeamId(3), 6, Weekday::Thu, time(20, 15), GameKind::RegularSeason));

        let due: Vec<&str> = schedule
            .due_games(6, Weekday::Tue)
            .iter()
            .map(|g| g.id.as_str())
            .collect();

        assert_eq!(due, vec!["thu", "early", "early2", "late"]);
    }

    #[test]
    fn test_find_corruption_detects_double_booking() {
        let teams = (1..=8)
            .map(|id| Team::new(TeamId(id), &format!("T{}", id), &format!("T{}", id), "Nova", "East"))
            .collect();
        let registry = TeamRegistry::new(teams, "Nova").unwrap();

        let mut schedule = schedule();
        assert_eq!(schedule.find_corruption(&registry), None);

        schedule.add_game(ScheduledGame::new("dup".into(), TeamId(1), TeamId(3), 5, Weekday::Mon, time(20, 15), GameKind::RegularSeason));
        assert!(schedule.find_corruption(&registry).is_some());
    }
}
