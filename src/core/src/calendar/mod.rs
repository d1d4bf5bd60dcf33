mod calendar;
mod phase;
mod settings;

pub use calendar::*;
pub use phase::*;
pub use settings::*;
