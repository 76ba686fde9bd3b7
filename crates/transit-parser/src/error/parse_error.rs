//! The error returned when a phase cannot produce a result.
//!
//! Loading, validation and reverse translation each gather their
//! diagnostics in a [`DiagnosticCollector`](crate::error::DiagnosticCollector).
//! When any of them is an error the phase stops and hands back a
//! [`ParseError`] holding everything it found, warnings included, so a
//! caller sees the whole picture of a broken document in one report.

use std::fmt;

use crate::error::Diagnostic;

/// Single-diagnostic result used by the loaders before collection starts.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Every diagnostic of a failed loading, validation or reverse phase.
///
/// `Display` shows the first diagnostic and how many follow it.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Diagnostics in the order the phase emitted them.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.diagnostics.first() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        match self.diagnostics.len() - 1 {
            0 => Ok(()),
            rest => write!(f, " (+{rest} more)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
