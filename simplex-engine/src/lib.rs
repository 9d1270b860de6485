mod helpers;

pub mod command;
pub mod simplex;
