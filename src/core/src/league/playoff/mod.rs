mod bracket;
mod seeder;

pub use bracket::*;
pub use seeder::*;
