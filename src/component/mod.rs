mod rational;
mod solution;
mod table;

pub use rational::Rational;
pub use solution::Solution;
pub use table::Table;
