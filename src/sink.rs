use std::io::{self, Write};

use log::debug;

use crate::utils::{Diagnostic, Location, Severity};

/// Receives diagnostics from a [`Validator`](crate::validator::Validator).
pub trait ErrorSink {
    fn warning(&mut self, location: &Location, message: &str);
    fn error(&mut self, location: &Location, message: &str);
    /// After a fatal diagnostic no more are sent for the current document.
    fn fatal(&mut self, location: &Location, message: &str);

    fn report(&mut self, diagnostic: &Diagnostic) {
        let Diagnostic {
            severity,
            location,
            message,
        } = diagnostic;
        match severity {
            Severity::Warning => self.warning(location, message),
            Severity::Error => self.error(location, message),
            Severity::Fatal => self.fatal(location, message),
        }
    }
}

/// Prints each diagnostic as one line:
/// `ERROR: element type 'x' is not declared at doc.xml:3:5`.
#[derive(Debug)]
pub struct ErrorPrinter<W: Write> {
    out: W,
    counts: [usize; 3],
    write_error: Option<io::Error>,
}

impl<W: Write> ErrorPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            counts: [0; 3],
            write_error: None,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity as usize]
    }

    /// Surfaces the first failed write, if any, and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        debug!(
            "{} warnings, {} errors, {} fatal errors",
            self.count(Severity::Warning),
            self.count(Severity::Error),
            self.count(Severity::Fatal)
        );
        match self.write_error.take() {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn print(&mut self, severity: Severity, location: &Location, message: &str) {
        self.counts[severity as usize] += 1;
        if self.write_error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{severity}: {message} at {location}") {
            self.write_error = Some(e);
        }
    }
}

impl<W: Write> ErrorSink for ErrorPrinter<W> {
    fn warning(&mut self, location: &Location, message: &str) {
        self.print(Severity::Warning, location, message);
    }

    fn error(&mut self, location: &Location, message: &str) {
        self.print(Severity::Error, location, message);
    }

    fn fatal(&mut self, location: &Location, message: &str) {
        self.print(Severity::Fatal, location, message);
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    pub diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }
}

impl ErrorSink for Collector {
    fn warning(&mut self, location: &Location, message: &str) {
        self.diagnostics
            .push(Diagnostic::new(Severity::Warning, location.clone(), message));
    }

    fn error(&mut self, location: &Location, message: &str) {
        self.diagnostics
            .push(Diagnostic::new(Severity::Error, location.clone(), message));
    }

    fn fatal(&mut self, location: &Location, message: &str) {
        self.diagnostics
            .push(Diagnostic::new(Severity::Fatal, location.clone(), message));
    }
}
