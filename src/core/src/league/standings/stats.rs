use crate::league::{StandingsLedger, TeamOutcome, WinLossTie};
use crate::TeamId;
use std::collections::BTreeSet;

/// Derived statistics read by the tie-break criteria. Everything here is a
/// pure function of the ledger's records and game log.
impl StandingsLedger {
    pub fn division_pct(&self, team: TeamId) -> f64 {
        self.record(team).map(|record| record.division_record.pct()).unwrap_or(0.0)
    }

    pub fn conference_pct(&self, team: TeamId) -> f64 {
        self.record(team).map(|record| record.conference_record.pct()).unwrap_or(0.0)
    }

    /// `team`'s record restricted to games against `opponents`.
    pub fn record_against(&self, team: TeamId, opponents: &BTreeSet<TeamId>) -> WinLossTie {
        let mut record = WinLossTie::default();

        for game in self.games_for(team) {
            let Some(opponent) = game.opponent_of(team) else {
                continue;
            };
            if !opponents.contains(&opponent) {
                continue;
            }

            let outcome = match game.winner() {
                Some(winner) if winner == team => TeamOutcome::Win,
                Some(_) => TeamOutcome::Loss,
                None => TeamOutcome::Tie,
            };
            record.add(outcome);
        }

        record
    }

    pub fn net_points_against(&self, team: TeamId, opponents: &BTreeSet<TeamId>) -> i64 {
        self.games_for(team)
            .filter(|game| game.opponent_of(team).is_some_and(|opponent| opponents.contains(&opponent)))
            .filter_map(|game| game.points_for(team))
            .map(|(scored, allowed)| scored as i64 - allowed as i64)
            .sum()
    }

    pub fn have_played(&self, a: TeamId, b: TeamId) -> bool {
        self.record(a).is_some_and(|record| record.opponents.contains(&b))
    }

    /// True when every pair in `group` met at least once this season.
    pub fn all_played_each_other(&self, group: &[TeamId]) -> bool {
        group
            .iter()
            .enumerate()
            .all(|(index, a)| group[index + 1..].iter().all(|b| self.have_played(*a, *b)))
    }

    /// Win percentage in games against the rest of `group`.
    pub fn head_to_head_pct(&self, team: TeamId, group: &[TeamId]) -> f64 {
        let others: BTreeSet<TeamId> = group.iter().copied().filter(|other| *other != team).collect();

        self.record_against(team, &others).pct()
    }

    /// Opponents every team in `group` has faced.
    pub fn common_opponents(&self, group: &[TeamId]) -> BTreeSet<TeamId> {
        let mut sets = group.iter().map(|team| {
            self.record(*team)
                .map(|record| record.opponents.clone())
                .unwrap_or_default()
        });

        let Some(first) = sets.next() else {
            return BTreeSet::new();
        };

        let members: BTreeSet<TeamId> = group.iter().copied().collect();

        sets.fold(first, |common, set| common.intersection(&set).copied().collect())
            .difference(&members)
            .copied()
            .collect()
    }

    pub fn common_games_pct(&self, team: TeamId, common: &BTreeSet<TeamId>) -> f64 {
        self.record_against(team, common).pct()
    }

    /// Average win percentage of the teams `team` beat, one entry per win.
    pub fn strength_of_victory(&self, team: TeamId) -> f64 {
        let Some(record) = self.record(team) else {
            return 0.0;
        };

        average(record.defeated.iter().map(|opponent| self.win_pct(*opponent)))
    }

    /// Average win percentage of every distinct opponent `team` faced.
    pub fn strength_of_schedule(&self, team: TeamId) -> f64 {
        let Some(record) = self.record(team) else {
            return 0.0;
        };

        average(record.opponents.iter().map(|opponent| self.win_pct(*opponent)))
    }

    /// Points-for rank plus points-against rank inside `pool`. Lower is
    /// better; equal values share a rank.
    pub fn combined_rank(&self, team: TeamId, pool: &[TeamId]) -> u32 {
        let Some(record) = self.record(team) else {
            return u32::MAX;
        };

        let records: Vec<_> = pool.iter().filter_map(|id| self.record(*id)).collect();

        let scoring_rank = 1 + records.iter().filter(|other| other.points_for > record.points_for).count() as u32;
        let defense_rank = 1 + records
            .iter()
            .filter(|other| other.points_against < record.points_against)
            .count() as u32;

        scoring_rank + defense_rank
    }

    pub fn net_points(&self, team: TeamId) -> i64 {
        self.record(team).map(|record| record.net_points()).unwrap_or(0)
    }

    pub fn net_touchdowns(&self, team: TeamId) -> i32 {
        self.record(team).map(|record| record.net_touchdowns).unwrap_or(0)
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{game, standard_registry};

    fn ledger() -> StandingsLedger {
        let mut ledger = StandingsLedger::new(&standard_registry());

        // Atlas East: 1, 2, 3, 4
        ledger.apply_result(&game(1, 2, 24, 10)).unwrap();
        ledger.apply_result(&game(3, 1, 17, 20)).unwrap();
        ledger.apply_result(&game(2, 3, 13, 13)).unwrap();
        ledger.apply_result(&game(1, 5, 7, 14)).unwrap();
        ledger.apply_result(&game(2, 5, 30, 3)).unwrap();
        ledger.apply_result(&game(4, 6, 10, 9)).unwrap();
        ledger
    }

    #[test]
    fn test_head_to_head_requires_every_pair() {
        let ledger = ledger();

        assert!(ledger.all_played_each_other(&[TeamId(1), TeamId(2), TeamId(3)]));
        assert!(!ledger.all_played_each_other(&[TeamId(1), TeamId(4)]));
        assert_eq!(ledger.head_to_head_pct(TeamId(1), &[TeamId(1), TeamId(2), TeamId(3)]), 1.0);
        assert_eq!(ledger.head_to_head_pct(TeamId(2), &[TeamId(1), TeamId(2), TeamId(3)]), 0.25);
    }

    #[test]
    fn test_common_opponents_exclude_group() {
        let ledger = ledger();
        let common = ledger.common_opponents(&[TeamId(1), TeamId(2)]);

        assert_eq!(common, [TeamId(3), TeamId(5)].into_iter().collect());
        assert_eq!(ledger.common_games_pct(TeamId(1), &common), 0.5);
        assert_eq!(ledger.common_games_pct(TeamId(2), &common), 0.75);
        assert_eq!(ledger.net_points_against(TeamId(2), &common), 27);
        assert!(ledger.common_opponents(&[TeamId(4), TeamId(1)]).is_empty());
    }

    #[test]
    fn test_strength_of_victory_and_schedule() {
        let ledger = ledger();

        // 1 beat 2 (1-1-1) and 3 (0-1-1)
        assert!((ledger.strength_of_victory(TeamId(1)) - (0.5 + 0.25) / 2.0).abs() < 1e-12);
        // 1 faced 2, 3 and 5 (1-1)
        assert!((ledger.strength_of_schedule(TeamId(1)) - (0.5 + 0.25 + 0.5) / 3.0).abs() < 1e-12);
        assert_eq!(ledger.strength_of_victory(TeamId(3)), 0.0);
    }

    #[test]
    fn test_combined_rank_shares_ties() {
        let ledger = ledger();
        let pool = ledger.conference_teams("Atlas");

        // 2 scored the most (53) but ten idle teams allowed fewer than its 40
        assert_eq!(ledger.combined_rank(TeamId(2), &pool), 1 + 15);
        assert_eq!(ledger.combined_rank(TeamId(1), &pool), 2 + 16);
        // idle teams share seventh in scoring and first in defense
        assert_eq!(ledger.combined_rank(TeamId(7), &pool), 7 + 1);
        assert_eq!(ledger.combined_rank(TeamId(16), &pool), 7 + 1);
    }
}
