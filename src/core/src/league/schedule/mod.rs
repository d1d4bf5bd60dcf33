mod generator;
mod playoff;
mod schedule;

pub use generator::*;
pub use schedule::*;
