mod playoff;
mod result;
mod schedule;
mod standings;
mod tiebreak;

pub use playoff::*;
pub use result::*;
pub use schedule::*;
pub use standings::*;
pub use tiebreak::*;
