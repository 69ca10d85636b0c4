use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use xml_validate::*;

#[derive(Parser, Debug)]
#[command(version, about = "Validate XML files against the DTD they declare")]
struct Args {
    /// Files to validate, as glob patterns
    patterns: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    let mut out = io::stdout().lock();
    validate_patterns(&args.patterns, &mut out)?;
    out.flush()?;
    Ok(())
}
