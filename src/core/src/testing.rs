use crate::league::{BoxScore, GameKind, GameResult};
use crate::{Team, TeamId, TeamRegistry};

pub const CONFERENCES: [&str; 2] = ["Atlas", "Nova"];
pub const DIVISIONS: [&str; 4] = ["East", "North", "South", "West"];

/// Two conferences of four four-team divisions. Ids run 1..=32 with
/// Atlas taking 1..=16 and each division four consecutive ids.
pub fn standard_registry() -> TeamRegistry {
    layout_registry(4)
}

/// Two conferences of two four-team divisions.
pub fn small_registry() -> TeamRegistry {
    layout_registry(2)
}

fn layout_registry(divisions: usize) -> TeamRegistry {
    let mut teams = Vec::new();
    let mut id = 1;

    for conference in CONFERENCES {
        for division in DIVISIONS.iter().take(divisions) {
            for _ in 0..4 {
                teams.push(Team::new(TeamId(id), &format!("Team {}", id), &format!("T{:02}", id), conference, division));
                id += 1;
            }
        }
    }

    TeamRegistry::new(teams, "Nova").unwrap()
}

pub fn game(home: u32, away: u32, home_score: u16, away_score: u16) -> GameResult {
    GameResult::new(
        &format!("{}-{}-{}", home, away, home_score),
        TeamId(home),
        TeamId(away),
        BoxScore::new(home_score, away_score),
        5,
        GameKind::RegularSeason,
    )
}
