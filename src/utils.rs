use std::fmt::Display;

use strum::Display as StrumDisplay;

/// How bad a diagnostic is. `Fatal` means the parser gave up on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

/// Position of a diagnostic. Line and column are 1-based; 0 means libxml2 did not
/// report one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub system_id: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[inline]
    pub fn new(system_id: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            system_id: system_id.into(),
            line,
            column,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.system_id)?;
        if self.line > 0 {
            write!(f, ":{}", self.line)?;
            if self.column > 0 {
                write!(f, ":{}", self.column)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names() {
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn location_omits_unknown_parts() {
        assert_eq!(Location::new("a.xml", 3, 7).to_string(), "a.xml:3:7");
        assert_eq!(Location::new("a.xml", 3, 0).to_string(), "a.xml:3");
        assert_eq!(Location::new("a.xml", 0, 0).to_string(), "a.xml");
    }
}
