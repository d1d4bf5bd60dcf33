use crate::league::{BoxScore, GameKind};
use crate::{PlayoffRound, Team};

/// What the orchestrator knows about a game when it asks for a result.
#[derive(Debug, Clone, PartialEq)]
pub struct GameContext {
    pub game_id: String,
    pub year: i32,
    pub week: u8,
    pub kind: GameKind,
    pub round: Option<PlayoffRound>,
    /// 0 on the first request, incremented each time a result is rejected.
    pub attempt: u32,
    pub seed: u64,
}

impl GameContext {
    pub fn is_playoff(&self) -> bool {
        self.kind == GameKind::Playoff
    }

    /// Stable per-game seed derived from the season seed and the game's
    /// identity. `std::hash` output may change between Rust releases, so the
    /// mix is a fixed splitmix64 chain that keeps saved seasons replayable.
    pub fn game_seed(&self) -> u64 {
        let mut state = self.seed;

        state = splitmix64(state ^ self.year as u64);
        state = splitmix64(state ^ self.week as u64);
        for byte in self.game_id.bytes() {
            state = splitmix64(state ^ byte as u64);
        }

        splitmix64(state ^ self.attempt as u64)
    }
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Boundary to whatever plays the actual game. `None` means the game was not
/// played and will be requested again on a later day.
pub trait GameSimulator {
    fn simulate(&self, home: &Team, away: &Team, context: &GameContext) -> Option<BoxScore>;
}

impl<F> GameSimulator for F
where
    F: Fn(&Team, &Team, &GameContext) -> Option<BoxScore>,
{
    fn simulate(&self, home: &Team, away: &Team, context: &GameContext) -> Option<BoxScore> {
        self(home, away, context)
    }
}
