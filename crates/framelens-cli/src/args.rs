use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "framelens")]
#[command(about = "Reconstruct the frame structure of a graphics capture log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Converted capture stream (one JSON record per line); reads stdin
    /// when omitted
    pub input: Option<PathBuf>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    pub format: Format,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Suppress the unhandled-call summary printed to stderr
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Collapsible HTML report
    Html,
    /// Report tree as JSON
    Json,
    /// Indented plain-text tree
    Text,
}
