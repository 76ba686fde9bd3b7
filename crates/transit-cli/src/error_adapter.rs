//! Error adapter for converting TransitError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`transit_parser::error::ParseError`] contains multiple diagnostics,
//! each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity as MietteSeverity};

use transit::TransitError;
use transit_parser::error::{Diagnostic, Severity};

/// Adapter for a single transit diagnostic.
///
/// Transit diagnostics point at document locations rather than byte
/// spans, so the location is folded into the help text instead of being
/// rendered as a source snippet.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let text = match (self.diag.location(), self.diag.help()) {
            (None, None) => return None,
            (None, Some(help)) => help.to_string(),
            (Some(location), None) => format!("at {location}"),
            (Some(location), Some(help)) => format!("at {location}: {help}"),
        };
        Some(Box::new(text))
    }
}

/// Adapter for non-diagnostic [`TransitError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a TransitError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TransitError::Io(_) => "transit::io",
            TransitError::Parse { .. } => return None,
            TransitError::Config(_) => "transit::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with code, severity and location.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`TransitError`] into a list of reportable errors.
///
/// For [`TransitError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &TransitError) -> Vec<Reportable<'_>> {
    match err {
        TransitError::Parse { err: parse_err, .. } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render a diagnostic with miette's graphical handler.
pub fn render(reportable: &dyn MietteDiagnostic) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter.render_report(&mut writer, reportable).is_err() {
        // Fall back to the plain message.
        writer = reportable.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use transit_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("duplicate state id `review`")
            .with_code(ErrorCode::E200)
            .with_location("/states/3/stateId")
            .with_help("state ids must be unique");
        let err = TransitError::new_parse_error(ParseError::from(diag), "{}");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "duplicate state id `review`");
                assert_eq!(
                    d.help().map(|help| help.to_string()),
                    Some("at /states/3/stateId: state ids must be unique".to_string())
                );
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("element without id").with_code(ErrorCode::E102),
            Diagnostic::error("sequence flow without sourceRef").with_code(ErrorCode::E103),
        ];
        let err = TransitError::new_parse_error(ParseError::from(diags), "<definitions/>");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "element without id");
        assert_eq!(reportables[1].to_string(), "sequence flow without sourceRef");
        assert_eq!(
            reportables[1].code().map(|code| code.to_string()),
            Some("E103".to_string())
        );
    }

    #[test]
    fn test_non_parse_error() {
        let err = TransitError::Config("bad layout".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad layout");
                assert_eq!(
                    e.code().map(|code| code.to_string()),
                    Some("transit::config".to_string())
                );
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_warning_severity_and_location_only_help() {
        let diag = Diagnostic::warning("transition `t1` targets unknown state `ghost`")
            .with_code(ErrorCode::E202)
            .with_location("/transitions/0/toStateId");

        let adapter = DiagnosticAdapter::new(&diag);

        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
        assert_eq!(
            adapter.help().map(|help| help.to_string()),
            Some("at /transitions/0/toStateId".to_string())
        );
    }

    #[test]
    fn test_render_includes_code_and_message() {
        let diag = Diagnostic::error("missing process element").with_code(ErrorCode::E101);

        let text = render(&DiagnosticAdapter::new(&diag));

        assert!(text.contains("E101"));
        assert!(text.contains("missing process element"));
    }
}
