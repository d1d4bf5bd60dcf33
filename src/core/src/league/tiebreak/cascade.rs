use crate::league::{Criterion, StandingsLedger, DIVISION_CASCADE, WILD_CARD_CASCADE};
use crate::TeamId;
use log::debug;

/// Criterion values closer than this are treated as equal.
const VALUE_RESOLUTION: f64 = 1e-9;

/// Orders teams by walking an ordered list of criteria. Each step splits the
/// current group into buckets of equal value; a bucket with more than one
/// team continues at the next step. Ties left after the last step keep their
/// input order.
pub struct TieBreaker<'a> {
    ledger: &'a StandingsLedger,
    criteria: &'a [Criterion],
}

impl<'a> TieBreaker<'a> {
    pub fn new(ledger: &'a StandingsLedger, criteria: &'a [Criterion]) -> Self {
        TieBreaker { ledger, criteria }
    }

    pub fn division(ledger: &'a StandingsLedger) -> Self {
        Self::new(ledger, &DIVISION_CASCADE)
    }

    pub fn wild_card(ledger: &'a StandingsLedger) -> Self {
        Self::new(ledger, &WILD_CARD_CASCADE)
    }

    /// Total order of `teams`, best first.
    pub fn rank(&self, teams: &[TeamId]) -> Vec<TeamId> {
        self.cascade(teams, 0)
    }

    pub fn top(&self, teams: &[TeamId]) -> Option<TeamId> {
        self.rank(teams).first().copied()
    }

    fn cascade(&self, group: &[TeamId], start: usize) -> Vec<TeamId> {
        if group.len() <= 1 {
            return group.to_vec();
        }

        for (index, criterion) in self.criteria.iter().enumerate().skip(start) {
            let Some(values) = criterion.evaluate(group, self.ledger) else {
                continue;
            };

            let buckets = partition(group, &values);
            if buckets.len() == 1 {
                continue;
            }

            debug!("tie-break: {} splits {} teams into {} groups", criterion, group.len(), buckets.len());

            return buckets
                .iter()
                .flat_map(|bucket| self.cascade(bucket, index + 1))
                .collect();
        }

        group.to_vec()
    }
}

/// Groups `teams` by value, best value first. Members of a bucket keep the
/// order they had in `teams`.
pub fn partition(teams: &[TeamId], values: &[f64]) -> Vec<Vec<TeamId>> {
    let keys: Vec<i64> = values.iter().map(|value| quantize(*value)).collect();

    let mut distinct = keys.clone();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    distinct
        .into_iter()
        .map(|key| {
            teams
                .iter()
                .zip(&keys)
                .filter(|(_, team_key)| **team_key == key)
                .map(|(team, _)| *team)
                .collect()
        })
        .collect()
}

fn quantize(value: f64) -> i64 {
    if value.is_nan() {
        return i64::MIN;
    }

    (value / VALUE_RESOLUTION).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{game, standard_registry};
    use proptest::prelude::*;

    #[test]
    fn test_partition_is_stable() {
        let teams = [TeamId(4), TeamId(1), TeamId(3), TeamId(2)];
        let buckets = partition(&teams, &[0.5, 0.75, 0.5, 0.75]);

        assert_eq!(buckets, vec![vec![TeamId(1), TeamId(2)], vec![TeamId(4), TeamId(3)]]);
    }

    #[test]
    fn test_partition_merges_rounding_noise() {
        let teams = [TeamId(1), TeamId(2)];
        let buckets = partition(&teams, &[0.1 + 0.2, 0.3]);

        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_win_pct_decides_before_head_to_head() {
        // A (10-4-0) and B (9-4-1) share a division and never met
        let mut ledger = StandingsLedger::new(&standard_registry());
        {
            let a = ledger.record_mut(TeamId(1)).unwrap();
            a.wins = 10;
            a.losses = 4;
            a.points_for = 350;
        }
        {
            let b = ledger.record_mut(TeamId(2)).unwrap();
            b.wins = 9;
            b.losses = 4;
            b.ties = 1;
            b.points_for = 340;
        }

        assert!((ledger.win_pct(TeamId(1)) - 0.714).abs() < 1e-3);
        assert!((ledger.win_pct(TeamId(2)) - 0.679).abs() < 1e-3);

        let order = TieBreaker::division(&ledger).rank(&[TeamId(2), TeamId(1)]);
        assert_eq!(order, vec![TeamId(1), TeamId(2)]);
    }

    #[test]
    fn test_split_head_to_head_falls_through_to_conference_pct() {
        let mut ledger = StandingsLedger::new(&standard_registry());

        // 1 (Atlas East) and 5 (Atlas North) split their series
        ledger.apply_result(&game(1, 5, 21, 14)).unwrap();
        ledger.apply_result(&game(5, 1, 21, 14)).unwrap();
        // 1 wins a conference game, 5 wins against Nova
        ledger.apply_result(&game(1, 2, 10, 7)).unwrap();
        ledger.apply_result(&game(5, 17, 10, 7)).unwrap();

        assert_eq!(ledger.win_pct(TeamId(1)), ledger.win_pct(TeamId(5)));
        assert!(ledger.conference_pct(TeamId(1)) > ledger.conference_pct(TeamId(5)));

        let order = TieBreaker::wild_card(&ledger).rank(&[TeamId(5), TeamId(1)]);
        assert_eq!(order, vec![TeamId(1), TeamId(5)]);
    }

    #[test]
    fn test_head_to_head_sweep_decides_division_tie() {
        let mut ledger = StandingsLedger::new(&standard_registry());

        ledger.apply_result(&game(3, 4, 20, 10)).unwrap();
        ledger.apply_result(&game(4, 9, 20, 10)).unwrap();
        ledger.apply_result(&game(9, 3, 20, 10)).unwrap();

        let order = TieBreaker::division(&ledger).rank(&[TeamId(4), TeamId(3)]);
        assert_eq!(order, vec![TeamId(3), TeamId(4)]);
    }

    #[test]
    fn test_subgroup_continues_at_next_criterion() {
        let mut ledger = StandingsLedger::new(&standard_registry());

        // three teams at 1-1; 1 and 2 split their series
        ledger.apply_result(&game(1, 2, 14, 10)).unwrap();
        ledger.apply_result(&game(2, 1, 14, 10)).unwrap();
        ledger.apply_result(&game(3, 20, 14, 10)).unwrap();
        ledger.apply_result(&game(21, 3, 14, 10)).unwrap();

        // head-to-head skipped (3 never met 1 or 2), division pct splits 3 off
        let order = TieBreaker::division(&ledger).rank(&[TeamId(3), TeamId(2), TeamId(1)]);
        assert_eq!(order[2], TeamId(3));
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_identical_teams_keep_input_order() {
        let ledger = StandingsLedger::new(&standard_registry());

        let order = TieBreaker::division(&ledger).rank(&[TeamId(4), TeamId(2), TeamId(3)]);
        assert_eq!(order, vec![TeamId(4), TeamId(2), TeamId(3)]);
        assert!(TieBreaker::wild_card(&ledger).rank(&[]).is_empty());
        assert_eq!(TieBreaker::wild_card(&ledger).top(&[TeamId(9)]), Some(TeamId(9)));
    }

    proptest! {
        #[test]
        fn test_better_win_pct_always_ranks_first(results in prop::collection::vec((1u32..=16, 1u32..=16, 0u16..40, 0u16..40), 0..80)) {
            let mut ledger = StandingsLedger::new(&standard_registry());
            for (home, away, home_score, away_score) in results {
                if home != away {
                    ledger.apply_result(&game(home, away, home_score, away_score)).unwrap();
                }
            }

            let teams = ledger.conference_teams("Atlas");
            let division = TieBreaker::division(&ledger).rank(&teams);
            let wild_card = TieBreaker::wild_card(&ledger).rank(&teams);

            for order in [division, wild_card] {
                prop_assert_eq!(order.len(), teams.len());
                for (index, better) in order.iter().enumerate() {
                    for worse in &order[index + 1..] {
                        prop_assert!(ledger.win_pct(*better) >= ledger.win_pct(*worse));
                    }
                }
            }
        }
    }
}
