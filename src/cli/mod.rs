pub mod commands;
pub mod report;
pub mod serve;

pub use commands::{Cli, Commands};
