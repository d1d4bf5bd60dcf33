use crate::calendar::{Calendar, DayTransition};
use crate::league::{
    AdvanceOutcome, BoxScore, GameKind, GameResult, PlayoffBracket, PlayoffSeeder, PlayoffSeeds, Schedule, ScheduleGenerator,
    ScheduledGame, StandingsLedger,
};
use crate::simulator::{GameContext, GameSimulator};
use crate::{
    AdvanceSummary, ChampionRecord, Diagnostic, Logging, SeasonArchive, SeasonDayResult, SeasonError, SeasonResult,
    SeasonSettings, SeasonSnapshot, TeamId, TeamRegistry,
};
use log::{debug, info};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::collections::BTreeMap;

/// Top-level driver: one call to `advance_day` plays the day's games, moves
/// the playoff bracket along and steps the calendar.
#[derive(Debug)]
pub struct Season {
    settings: SeasonSettings,
    registry: TeamRegistry,
    calendar: Calendar,
    schedule: Schedule,
    ledger: StandingsLedger,
    bracket: Option<PlayoffBracket>,
    champions: Vec<ChampionRecord>,
    archives: Vec<SeasonArchive>,
    attempts: BTreeMap<String, u32>,
    seeding_blocked: bool,
}

impl Season {
    pub fn new(registry: TeamRegistry, settings: SeasonSettings) -> SeasonResult<Self> {
        settings.validate()?;

        let year = settings.start_year;
        let calendar = Calendar::new(year, settings.calendar.clone())?;
        let schedule = Logging::estimate_result(
            || ScheduleGenerator::generate(&registry, &settings.calendar, year, settings.seed),
            "schedule generated",
        )?;
        let ledger = StandingsLedger::new(&registry);

        for diagnostic in registry.diagnostics() {
            diagnostic.report();
        }

        info!("🏈 season {} ready: {} teams, {} scheduled games", year, registry.len(), schedule.len());

        Ok(Season {
            settings,
            registry,
            calendar,
            schedule,
            ledger,
            bracket: None,
            champions: Vec::new(),
            archives: Vec::new(),
            attempts: BTreeMap::new(),
            seeding_blocked: false,
        })
    }

    pub fn settings(&self) -> &SeasonSettings {
        &self.settings
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn ledger(&self) -> &StandingsLedger {
        &self.ledger
    }

    pub fn bracket(&self) -> Option<&PlayoffBracket> {
        self.bracket.as_ref()
    }

    pub fn champions(&self) -> &[ChampionRecord] {
        &self.champions
    }

    pub fn archives(&self) -> &[SeasonArchive] {
        &self.archives
    }

    /// Display abbreviations are the only mutable part of team identity.
    pub fn rename_team(&mut self, team: TeamId, abbreviation: &str) -> SeasonResult<()> {
        self.registry.rename(team, abbreviation)
    }

    pub fn advance_day<S>(&mut self, simulator: &S) -> SeasonDayResult
    where
        S: GameSimulator + Sync,
    {
        let year = self.calendar.year();
        let week = self.calendar.week();
        let day = self.calendar.day();

        let mut diagnostics = Vec::new();

        let results = self.play_due_games(simulator, &mut diagnostics);
        let champion = self.advance_bracket(&mut diagnostics);

        let transition = self.calendar.advance_day();
        let (seeds, archived) = self.handle_transition(transition, &mut diagnostics);

        for diagnostic in &diagnostics {
            diagnostic.report();
        }

        SeasonDayResult {
            year,
            week,
            day,
            results,
            seeds,
            champion,
            archived,
            diagnostics,
            transition,
            display: self.calendar.display_info(),
        }
    }

    /// Advances day by day until `done` holds or `max_days` days have passed.
    pub fn advance_until<S, P>(&mut self, simulator: &S, mut done: P, max_days: usize) -> AdvanceSummary
    where
        S: GameSimulator + Sync,
        P: FnMut(&Season) -> bool,
    {
        let mut summary = AdvanceSummary::default();

        while summary.days < max_days {
            if done(self) {
                summary.reached = true;
                return summary;
            }

            let day = self.advance_day(simulator);
            summary.add(day);
        }

        summary.reached = done(self);
        summary
    }

    pub fn simulate_to_week<S>(&mut self, simulator: &S, year: i32, week: u8) -> AdvanceSummary
    where
        S: GameSimulator + Sync,
    {
        let max_days = self.settings.max_days_per_run;

        self.advance_until(
            simulator,
            |season| (season.calendar.year(), season.calendar.week()) >= (year, week),
            max_days,
        )
    }

    /// Runs through the rest of the current league year.
    pub fn simulate_year<S>(&mut self, simulator: &S) -> AdvanceSummary
    where
        S: GameSimulator + Sync,
    {
        let next_year = self.calendar.year() + 1;
        self.simulate_to_week(simulator, next_year, 1)
    }

    fn play_due_games<S>(&mut self, simulator: &S, diagnostics: &mut Vec<Diagnostic>) -> Vec<GameResult>
    where
        S: GameSimulator + Sync,
    {
        let week = self.calendar.week();
        let weekday = self.calendar.weekday();

        for game in self.schedule.games_for_day(week, weekday) {
            if !game.is_resolved() && !game.is_played() {
                diagnostics.push(Diagnostic::UnresolvedPlaceholder { game_id: game.id.clone() });
            }
        }

        let due: Vec<ScheduledGame> = self.schedule.due_games(week, weekday).into_iter().cloned().collect();
        if due.is_empty() {
            return Vec::new();
        }

        let registry = &self.registry;
        let attempts = &self.attempts;
        let year = self.schedule.year;
        let seed = self.settings.seed;

        let scores: Vec<Option<BoxScore>> = due
            .par_iter()
            .map(|game| {
                let (home, away) = game.teams()?;
                let context = GameContext {
                    game_id: game.id.clone(),
                    year,
                    week: game.week,
                    kind: game.kind,
                    round: game.round,
                    attempt: attempts.get(&game.id).copied().unwrap_or(0),
                    seed,
                };

                simulator.simulate(registry.get(home)?, registry.get(away)?, &context)
            })
            .collect();

        let mut results = Vec::with_capacity(due.len());

        for (game, score) in due.iter().zip(scores) {
            let Some(score) = score else {
                *self.attempts.entry(game.id.clone()).or_default() += 1;
                diagnostics.push(Diagnostic::MissingResult { game_id: game.id.clone() });
                continue;
            };

            if game.is_playoff() && score.is_tie() {
                *self.attempts.entry(game.id.clone()).or_default() += 1;
                diagnostics.push(Diagnostic::TiedPlayoffGame { game_id: game.id.clone() });
                continue;
            }

            let mut played = game.clone();
            played.result = Some(score);
            let Some(result) = played.to_result() else {
                continue;
            };

            if let Err(error) = self.apply(&result) {
                diagnostics.push(Diagnostic::InvariantViolation { message: error.to_string() });
                continue;
            }

            self.attempts.remove(&game.id);
            results.push(result);
        }

        debug!("{} week {}: {} games played", year, week, results.len());

        results
    }

    /// Regular-season results feed the standings; every result is stored on
    /// its scheduled game.
    fn apply(&mut self, result: &GameResult) -> SeasonResult<()> {
        if result.kind == GameKind::RegularSeason {
            self.ledger.apply_result(result)?;
        }

        self.schedule.record_result(&result.game_id, result.score)
    }

    fn advance_bracket(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Option<ChampionRecord> {
        let week = self.calendar.week();
        let bracket = self.bracket.as_mut()?;

        loop {
            let round = bracket.stage().round()?;
            let results: Vec<GameResult> = self
                .schedule
                .playoff_games(round)
                .into_iter()
                .filter_map(|game| game.to_result())
                .collect();

            match bracket.advance_round(&results, &mut self.schedule) {
                Ok(AdvanceOutcome::Advanced { .. }) => continue,
                Ok(AdvanceOutcome::Completed { champion, runner_up }) => {
                    let record = ChampionRecord {
                        year: bracket.year,
                        champion,
                        runner_up,
                    };

                    info!(
                        "🏆 {} Gridiron Bowl: {} def. {}",
                        record.year,
                        self.registry.label(champion),
                        self.registry.label(runner_up)
                    );

                    self.champions.push(record);
                    return Some(record);
                }
                Ok(AdvanceOutcome::AlreadyComplete) => return None,
                Ok(AdvanceOutcome::Deferred(diagnostic)) => {
                    if week > self.settings.calendar.week_of_round(round) {
                        diagnostics.push(diagnostic);
                    }
                    return None;
                }
                Err(error) => {
                    diagnostics.push(Diagnostic::InvariantViolation { message: error.to_string() });
                    return None;
                }
            }
        }
    }

    fn handle_transition(
        &mut self,
        transition: DayTransition,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (Option<PlayoffSeeds>, Option<SeasonArchive>) {
        if let DayTransition::NewYear { previous_year } = transition {
            let archive = self.start_new_year(previous_year, diagnostics);
            return (None, Some(archive));
        }

        // Retried every day after the regular season, offseason included.
        if self.bracket.is_none() && !self.seeding_blocked && self.calendar.is_regular_season_over() {
            return (self.try_seed(diagnostics), None);
        }

        (None, None)
    }

    /// Seeds and materializes the bracket once every regular-season game is
    /// in and the standings validate.
    fn try_seed(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Option<PlayoffSeeds> {
        let unplayed = self.schedule.unplayed(GameKind::RegularSeason).len();
        if unplayed > 0 {
            diagnostics.push(Diagnostic::SeedingDeferred {
                reason: format!("{} regular season games still unplayed", unplayed),
            });
            return None;
        }

        if let Err(error) = self.ledger.validate() {
            self.seeding_blocked = true;
            diagnostics.push(Diagnostic::InvariantViolation { message: error.to_string() });
            return None;
        }

        let seeds = match PlayoffSeeder::seed(&self.registry, &self.ledger) {
            Ok(seeds) => seeds,
            Err(error) => {
                self.seeding_blocked = true;
                diagnostics.push(Diagnostic::SeedingDeferred { reason: error.to_string() });
                return None;
            }
        };

        let bracket = PlayoffBracket::new(self.calendar.year(), seeds.clone());
        if let Err(error) = bracket.materialize(&mut self.schedule, &self.settings.calendar) {
            self.seeding_blocked = true;
            diagnostics.push(Diagnostic::SeedingDeferred { reason: error.to_string() });
            return None;
        }

        self.bracket = Some(bracket);

        Some(seeds)
    }

    /// Archives the finished year, then clears everything that belongs to it.
    fn start_new_year(&mut self, previous_year: i32, diagnostics: &mut Vec<Diagnostic>) -> SeasonArchive {
        let year = self.calendar.year();

        match &self.bracket {
            None => diagnostics.push(Diagnostic::SeasonUnfinished {
                year: previous_year,
                reason: String::from("no playoff bracket was built"),
            }),
            Some(bracket) if !bracket.is_complete() => diagnostics.push(Diagnostic::SeasonUnfinished {
                year: previous_year,
                reason: String::from("playoffs ended without a champion"),
            }),
            Some(_) => {}
        }

        let archive = SeasonArchive {
            year: previous_year,
            champion: self.champions.iter().rev().find(|record| record.year == previous_year).copied(),
            seeds: self.bracket.as_ref().map(|bracket| bracket.seeds.clone()),
            standings: self.ledger.sorted_by_conference(),
            games_played: self.ledger.games().len(),
        };
        self.archives.push(archive.clone());

        self.ledger.reset();
        self.bracket = None;
        self.attempts.clear();
        self.seeding_blocked = false;

        match ScheduleGenerator::generate(&self.registry, &self.settings.calendar, year, self.settings.seed) {
            Ok(schedule) => self.schedule = schedule,
            Err(error) => diagnostics.push(Diagnostic::InvariantViolation { message: error.to_string() }),
        }

        info!("🔄 season {} archived, {} begins", previous_year, year);

        archive
    }

    pub fn snapshot(&self) -> SeasonSnapshot {
        SeasonSnapshot {
            settings: self.settings.clone(),
            calendar: self.calendar.state().clone(),
            schedule: self.schedule.clone(),
            ledger: self.ledger.clone(),
            bracket: self.bracket.clone(),
            champions: self.champions.clone(),
            archives: self.archives.clone(),
            attempts: self.attempts.clone(),
            seeding_blocked: self.seeding_blocked,
        }
    }

    /// Rebuilds a season from a snapshot. A schedule that references unknown
    /// teams or double-books a team is regenerated, which also clears the
    /// standings it fed.
    pub fn restore(registry: TeamRegistry, snapshot: SeasonSnapshot) -> SeasonResult<(Season, Vec<Diagnostic>)> {
        snapshot.settings.validate()?;

        if let Some(team) = snapshot.ledger.teams().into_iter().find(|team| !registry.contains(*team)) {
            return Err(SeasonError::UnknownTeam(team));
        }
        if let Some(team) = registry.ids().into_iter().find(|team| snapshot.ledger.record(*team).is_none()) {
            return Err(SeasonError::UnknownTeam(team));
        }

        let calendar = Calendar::restore(snapshot.calendar, snapshot.settings.calendar.clone())?;
        let mut diagnostics = Vec::new();

        let mut season = Season {
            settings: snapshot.settings,
            registry,
            calendar,
            schedule: snapshot.schedule,
            ledger: snapshot.ledger,
            bracket: snapshot.bracket,
            champions: snapshot.champions,
            archives: snapshot.archives,
            attempts: snapshot.attempts,
            seeding_blocked: snapshot.seeding_blocked,
        };

        if let Some(reason) = season.schedule.find_corruption(&season.registry) {
            let year = season.calendar.year();

            season.schedule = ScheduleGenerator::generate(&season.registry, &season.settings.calendar, year, season.settings.seed)?;
            season.ledger.reset();
            season.bracket = None;
            season.attempts.clear();
            season.seeding_blocked = false;

            diagnostics.push(Diagnostic::ScheduleRegenerated { reason });
        }

        for diagnostic in &diagnostics {
            diagnostic.report();
        }

        Ok((season, diagnostics))
    }
}
