mod scoreboard;
mod simulator;

pub use scoreboard::*;
pub use simulator::*;
