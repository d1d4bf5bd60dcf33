mod ledger;
mod record;
mod stats;

pub use ledger::*;
pub use record::*;
