use crate::league::{StandingsLedger, TieBreaker};
use crate::{SeasonError, SeasonResult, TeamId, TeamRegistry};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PLAYOFF_SEEDS: usize = 7;
pub const WILD_CARDS: usize = 3;

/// Conference name to its seven playoff teams, seed 1 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffSeeds {
    conferences: BTreeMap<String, Vec<TeamId>>,
}

impl PlayoffSeeds {
    pub fn insert(&mut self, conference: &str, teams: Vec<TeamId>) {
        self.conferences.insert(conference.to_string(), teams);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<TeamId>)> {
        self.conferences.iter()
    }

    pub fn conference(&self, conference: &str) -> Option<&[TeamId]> {
        self.conferences.get(conference).map(|teams| teams.as_slice())
    }

    pub fn len(&self) -> usize {
        self.conferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conferences.is_empty()
    }

    /// 1-based seed of `team` within `conference`.
    pub fn seed_in(&self, conference: &str, team: TeamId) -> Option<usize> {
        self.conferences
            .get(conference)?
            .iter()
            .position(|seeded| *seeded == team)
            .map(|index| index + 1)
    }

    pub fn seed_of(&self, team: TeamId) -> Option<usize> {
        self.conferences
            .keys()
            .find_map(|conference| self.seed_in(conference, team))
    }

    pub fn conference_of(&self, team: TeamId) -> Option<&str> {
        self.conferences
            .iter()
            .find(|(_, teams)| teams.contains(&team))
            .map(|(conference, _)| conference.as_str())
    }

    pub fn team_at(&self, conference: &str, seed: usize) -> Option<TeamId> {
        self.conferences.get(conference)?.get(seed.checked_sub(1)?).copied()
    }
}

pub struct PlayoffSeeder;

impl PlayoffSeeder {
    /// Division winners take seeds 1-4, ordered with the division cascade.
    /// Seeds 5-7 are drawn one at a time from the rest of the conference with
    /// the wild-card cascade.
    pub fn seed(registry: &TeamRegistry, ledger: &StandingsLedger) -> SeasonResult<PlayoffSeeds> {
        let mut seeds = PlayoffSeeds::default();

        for conference in registry.conferences() {
            let conference_teams = registry.conference_teams(&conference);
            if conference_teams.len() < PLAYOFF_SEEDS {
                return Err(SeasonError::NotEnoughTeams {
                    conference,
                    found: conference_teams.len(),
                    required: PLAYOFF_SEEDS,
                });
            }

            let division_breaker = TieBreaker::division(ledger);
            let wild_card_breaker = TieBreaker::wild_card(ledger);

            let champions: Vec<TeamId> = registry
                .divisions(&conference)
                .iter()
                .filter_map(|division| division_breaker.top(&registry.division_teams(&conference, division)))
                .collect();

            let division_slots = PLAYOFF_SEEDS - WILD_CARDS;
            let mut field = division_breaker.rank(&champions);
            field.truncate(division_slots);

            let mut remaining: Vec<TeamId> = conference_teams
                .into_iter()
                .filter(|team| !field.contains(team))
                .collect();

            while field.len() < PLAYOFF_SEEDS {
                let Some(next) = wild_card_breaker.top(&remaining) else {
                    break;
                };

                field.push(next);
                remaining.retain(|team| *team != next);
            }

            if field.len() != PLAYOFF_SEEDS {
                return Err(SeasonError::InvariantViolation(format!(
                    "{} produced {} seeds",
                    conference,
                    field.len()
                )));
            }

            info!(
                "🌱 {} seeds: {}",
                conference,
                field
                    .iter()
                    .map(|team| registry.label(*team))
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            seeds.insert(&conference, field);
        }

        Ok(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{BoxScore, GameKind, GameResult};
    use crate::testing::{game, small_registry, standard_registry};
    use crate::Team;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn random_ledger(registry: &TeamRegistry, seed: u64) -> (StandingsLedger, Vec<GameResult>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ledger = StandingsLedger::new(registry);
        let ids = registry.ids();
        let mut results = Vec::new();

        for index in 0..272 {
            let home = ids[rng.gen_range(0..ids.len())];
            let away = ids[rng.gen_range(0..ids.len())];
            if home == away {
                continue;
            }

            let score = BoxScore::new(rng.gen_range(0..45), rng.gen_range(0..45));
            let result = GameResult::new(&format!("g{}", index), home, away, score, 5, GameKind::RegularSeason);
            ledger.apply_result(&result).unwrap();
            results.push(result);
        }

        (ledger, results)
    }

    #[test]
    fn test_seven_distinct_seeds_per_conference() {
        let registry = standard_registry();

        for seed in 0..10 {
            let (ledger, _) = random_ledger(&registry, seed);
            let seeds = PlayoffSeeder::seed(&registry, &ledger).unwrap();

            assert_eq!(seeds.len(), 2);
            for (conference, teams) in seeds.iter() {
                assert_eq!(teams.len(), PLAYOFF_SEEDS);

                let unique: HashSet<_> = teams.iter().collect();
                assert_eq!(unique.len(), PLAYOFF_SEEDS);
                assert!(teams.iter().all(|t| registry.conference_of(*t) == Some(conference.as_str())));

                let champion_divisions: HashSet<_> = teams[..4]
                    .iter()
                    .map(|t| registry.get(*t).map(|team| team.division.clone()))
                    .collect();
                assert_eq!(champion_divisions.len(), 4);
            }
        }
    }

    #[test]
    fn test_seeding_is_deterministic() {
        let registry = standard_registry();
        let (first, results) = random_ledger(&registry, 42);

        let mut replay = StandingsLedger::new(&registry);
        for result in &results {
            replay.apply_result(result).unwrap();
        }

        assert_eq!(
            PlayoffSeeder::seed(&registry, &first).unwrap(),
            PlayoffSeeder::seed(&registry, &replay).unwrap()
        );
    }

    #[test]
    fn test_division_winner_can_be_seeded_above_better_wild_card() {
        let registry = small_registry();
        let mut ledger = StandingsLedger::new(&registry);

        // Atlas East 1..=4, Atlas North 5..=8. 5 and 6 dominate, 1 edges East.
        ledger.apply_result(&game(5, 7, 30, 0)).unwrap();
        ledger.apply_result(&game(5, 8, 30, 0)).unwrap();
        ledger.apply_result(&game(6, 7, 30, 0)).unwrap();
        ledger.apply_result(&game(6, 8, 30, 0)).unwrap();
        ledger.apply_result(&game(1, 2, 10, 7)).unwrap();

        let seeds = PlayoffSeeder::seed(&registry, &ledger).unwrap();
        let atlas = seeds.conference("Atlas").unwrap();

        assert_eq!(atlas[0], TeamId(5));
        assert_eq!(atlas[1], TeamId(1));
        assert_eq!(atlas[2], TeamId(6));
        assert_eq!(seeds.seed_of(TeamId(6)), Some(3));
        assert_eq!(seeds.conference_of(TeamId(6)), Some("Atlas"));
        assert_eq!(seeds.team_at("Atlas", 1), Some(TeamId(5)));
        assert_eq!(seeds.team_at("Atlas", 0), None);
    }

    #[test]
    fn test_small_conference_is_rejected() {
        let teams = (1..=10)
            .map(|id| {
                let conference = if id <= 6 { "Atlas" } else { "Nova" };
                Team::new(TeamId(id), "T", "T", conference, "East")
            })
            .collect();
        let registry = TeamRegistry::new(teams, "Nova").unwrap();
        let ledger = StandingsLedger::new(&registry);

        assert!(matches!(
            PlayoffSeeder::seed(&registry, &ledger),
            Err(SeasonError::NotEnoughTeams { found: 6, .. })
        ));
    }
}
