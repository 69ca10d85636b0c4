//! Validates documents against the DTD they declare and forwards what libxml2
//! reports to an [`ErrorSink`].

use std::{fs, path::Path};

use anyhow::{Context, Result};
use libxml::error::{StructuredError, XmlErrorLevel};
use log::debug;

use crate::{
    libxml2::LibXml2Wrapper,
    sink::ErrorSink,
    utils::{Diagnostic, Location, Severity},
};

/// Validates one resource at a time, sending diagnostics to its error sink.
/// Without a sink, diagnostics are only logged.
#[derive(Default)]
pub struct Validator<'s> {
    sink: Option<&'s mut dyn ErrorSink>,
}

impl<'s> Validator<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error_sink(&mut self, sink: &'s mut dyn ErrorSink) {
        self.sink = Some(sink);
    }

    /// Well-formedness and validity problems go to the sink. Only failures to
    /// read the document or to run libxml2 at all are returned.
    pub fn validate_resource(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        self.validate_bytes(&path.display().to_string(), &bytes)
    }

    /// Validates an in-memory document. Relative system ids resolve against `system_id`.
    pub fn validate_str(&mut self, system_id: &str, text: &str) -> Result<()> {
        self.validate_bytes(system_id, text.as_bytes())
    }

    fn validate_bytes(&mut self, system_id: &str, bytes: &[u8]) -> Result<()> {
        let mut parser = LibXml2Wrapper::new()?;
        let errors = parser
            .validate_memory(system_id, bytes)
            .with_context(|| format!("cannot validate {system_id}"))?;
        debug!("{system_id}: libxml2 reported {} problems", errors.len());

        for diagnostic in errors.iter().filter_map(|e| to_diagnostic(system_id, e)) {
            match self.sink.as_deref_mut() {
                Some(sink) => sink.report(&diagnostic),
                None => debug!(
                    "{}: {} at {}",
                    diagnostic.severity, diagnostic.message, diagnostic.location
                ),
            }
        }
        Ok(())
    }
}

fn to_diagnostic(system_id: &str, error: &StructuredError) -> Option<Diagnostic> {
    let severity = match error.level {
        XmlErrorLevel::None => return None,
        XmlErrorLevel::Warning => Severity::Warning,
        XmlErrorLevel::Error => Severity::Error,
        XmlErrorLevel::Fatal => Severity::Fatal,
    };
    let position = |n: Option<i32>| n.and_then(|n| usize::try_from(n).ok()).unwrap_or(0);
    let location = Location::new(
        error.filename.as_deref().unwrap_or(system_id),
        position(error.line),
        position(error.col),
    );
    let message = error.message.as_deref().unwrap_or("unknown libxml2 error").trim_end();
    Some(Diagnostic::new(severity, location, message))
}
