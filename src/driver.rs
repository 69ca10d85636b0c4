use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::MatchOptions;
use log::{debug, info};

use crate::{sink::ErrorPrinter, validator::Validator};

/// Validates every file matching each pattern, in argument order and then glob
/// order. A pattern matching nothing is skipped without output.
pub fn validate_patterns<W: Write>(patterns: &[String], out: &mut W) -> Result<()> {
    for pattern in patterns {
        let files = expand(pattern)?;
        if files.is_empty() {
            debug!("No files match {pattern}");
            continue;
        }
        info!("Found {} files for {pattern}", files.len());

        writeln!(out, "Validating {pattern}")?;
        for file in files {
            validate_file(&file, out)?;
        }
    }
    Ok(())
}

/// Validates one file with a fresh validator, printing its diagnostics to `out`.
pub fn validate_file<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    debug!("Validating {}", path.display());
    let mut printer = ErrorPrinter::new(&mut *out);
    {
        let mut validator = Validator::new();
        validator.set_error_sink(&mut printer);
        validator.validate_resource(path)?;
    }
    printer
        .finish()
        .with_context(|| format!("cannot write diagnostics for {}", path.display()))?;
    Ok(())
}

/// Like a shell, `*` and `?` do not match a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

pub fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    glob::glob_with(pattern, MATCH_OPTIONS)
        .with_context(|| format!("invalid glob pattern '{pattern}'"))?
        .map(|entry| entry.with_context(|| format!("cannot expand '{pattern}'")))
        .collect()
}
