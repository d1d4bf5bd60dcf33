mod cascade;
mod criteria;

pub use cascade::*;
pub use criteria::*;
