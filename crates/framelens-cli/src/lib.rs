mod args;
mod commands;
pub mod output;

pub use args::{Cli, Format};
pub use commands::run;
