use crate::league::StandingsLedger;
use crate::TeamId;
use std::fmt;

/// A single tie-break step. Values are computed for a whole group because
/// several steps depend on who else is tied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    WinPct,
    HeadToHead,
    DivisionPct,
    CommonGamesPct,
    ConferencePct,
    StrengthOfVictory,
    StrengthOfSchedule,
    CombinedConferenceRank,
    CombinedLeagueRank,
    NetPointsCommon,
    NetPoints,
    NetTouchdowns,
}

/// Ordering teams inside one division, and division champions against each
/// other.
pub const DIVISION_CASCADE: [Criterion; 12] = [
    Criterion::WinPct,
    Criterion::HeadToHead,
    Criterion::DivisionPct,
    Criterion::CommonGamesPct,
    Criterion::ConferencePct,
    Criterion::StrengthOfVictory,
    Criterion::StrengthOfSchedule,
    Criterion::CombinedConferenceRank,
    Criterion::CombinedLeagueRank,
    Criterion::NetPointsCommon,
    Criterion::NetPoints,
    Criterion::NetTouchdowns,
];

/// Ordering teams from different divisions for the wild-card slots.
pub const WILD_CARD_CASCADE: [Criterion; 10] = [
    Criterion::WinPct,
    Criterion::HeadToHead,
    Criterion::ConferencePct,
    Criterion::CommonGamesPct,
    Criterion::StrengthOfVictory,
    Criterion::StrengthOfSchedule,
    Criterion::CombinedConferenceRank,
    Criterion::CombinedLeagueRank,
    Criterion::NetPoints,
    Criterion::NetTouchdowns,
];

impl Criterion {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::WinPct => "win percentage",
            Criterion::HeadToHead => "head-to-head",
            Criterion::DivisionPct => "division win percentage",
            Criterion::CommonGamesPct => "common games win percentage",
            Criterion::ConferencePct => "conference win percentage",
            Criterion::StrengthOfVictory => "strength of victory",
            Criterion::StrengthOfSchedule => "strength of schedule",
            Criterion::CombinedConferenceRank => "combined conference rank",
            Criterion::CombinedLeagueRank => "combined league rank",
            Criterion::NetPointsCommon => "net points in common games",
            Criterion::NetPoints => "net points",
            Criterion::NetTouchdowns => "net touchdowns",
        }
    }

    /// One value per team of `group`, in the same order; higher is better.
    /// `None` when the step does not apply to this group.
    pub fn evaluate(&self, group: &[TeamId], ledger: &StandingsLedger) -> Option<Vec<f64>> {
        let values = match self {
            Criterion::WinPct => group.iter().map(|team| ledger.win_pct(*team)).collect(),
            Criterion::HeadToHead => {
                if group.len() < 2 || !ledger.all_played_each_other(group) {
                    return None;
                }
                group.iter().map(|team| ledger.head_to_head_pct(*team, group)).collect()
            }
            Criterion::DivisionPct => {
                if !share_division(group, ledger) {
                    return None;
                }
                group.iter().map(|team| ledger.division_pct(*team)).collect()
            }
            Criterion::CommonGamesPct => {
                let common = ledger.common_opponents(group);
                if common.is_empty() {
                    return None;
                }
                group.iter().map(|team| ledger.common_games_pct(*team, &common)).collect()
            }
            Criterion::ConferencePct => group.iter().map(|team| ledger.conference_pct(*team)).collect(),
            Criterion::StrengthOfVictory => group.iter().map(|team| ledger.strength_of_victory(*team)).collect(),
            Criterion::StrengthOfSchedule => group.iter().map(|team| ledger.strength_of_schedule(*team)).collect(),
            Criterion::CombinedConferenceRank => group
                .iter()
                .map(|team| {
                    let pool = ledger
                        .record(*team)
                        .map(|record| ledger.conference_teams(&record.conference))
                        .unwrap_or_default();
                    -(ledger.combined_rank(*team, &pool) as f64)
                })
                .collect(),
            Criterion::CombinedLeagueRank => {
                let pool = ledger.teams();
                group
                    .iter()
                    .map(|team| -(ledger.combined_rank(*team, &pool) as f64))
                    .collect()
            }
            Criterion::NetPointsCommon => {
                let common = ledger.common_opponents(group);
                if common.is_empty() {
                    return None;
                }
                group
                    .iter()
                    .map(|team| ledger.net_points_against(*team, &common) as f64)
                    .collect()
            }
            Criterion::NetPoints => group.iter().map(|team| ledger.net_points(*team) as f64).collect(),
            Criterion::NetTouchdowns => group.iter().map(|team| ledger.net_touchdowns(*team) as f64).collect(),
        };

        Some(values)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn share_division(group: &[TeamId], ledger: &StandingsLedger) -> bool {
    let mut divisions = group
        .iter()
        .map(|team| ledger.record(*team).map(|record| (&record.conference, &record.division)));

    match divisions.next() {
        Some(Some(first)) => divisions.all(|division| division == Some(first)),
        _ => false,
    }
}
