pub mod commands;
pub mod check;
pub mod checks;
pub mod fetch;

pub use commands::{Cli, Commands};
