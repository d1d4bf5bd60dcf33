pub mod calendar;
pub mod diagnostic;
pub mod error;
pub mod league;
pub mod season;
pub mod simulator;
pub mod team;
pub mod utils;

#[cfg(test)]
mod testing;

pub use calendar::*;
pub use diagnostic::*;
pub use error::*;
pub use league::*;
pub use season::*;
pub use simulator::*;
pub use team::*;
pub use utils::*;
