mod registry;
mod team;

pub use registry::*;
pub use team::*;
