use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use std::fs::File;
use std::io::{self, BufReader, Write};

use framelens_capture::read_capture;
use framelens_engine::reconstruct;
use framelens_types::CaptureEvent;

use crate::args::{Cli, Format};
use crate::output;

/// Two-phase batch run: ingest the whole stream, reconstruct, then
/// render. Frame attribution and snapshot correctness require the full
/// ordered pass, so nothing is emitted until ingest completes.
pub fn run(cli: Cli) -> Result<()> {
    let events: Vec<CaptureEvent> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open capture {}", path.display()))?;
            read_capture(BufReader::new(file))?
        }
        None => read_capture(io::stdin().lock())?,
    };

    let reconstruction = reconstruct(events)?;
    let report = reconstruction.report();

    let color = cli.output.is_none() && io::stdout().is_terminal();
    let rendered = match cli.format {
        Format::Html => output::html::render(&report),
        Format::Json => output::json::render(&report)?,
        Format::Text => output::text::render(&report, color),
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    if !cli.quiet && !reconstruction.diagnostics.is_clean() {
        let unhandled = reconstruction.diagnostics.unhandled();
        eprintln!("{} call kinds without special processing:", unhandled.len());
        for name in unhandled {
            eprintln!("  {}", name);
        }
    }

    Ok(())
}
