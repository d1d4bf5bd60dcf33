mod result;
mod season;
mod settings;
mod snapshot;

pub use result::*;
pub use season::*;
pub use settings::*;
pub use snapshot::*;
