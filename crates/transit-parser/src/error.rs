//! Error and diagnostic system for Transit.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Document locations for pointing at the offending field or element
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors and warnings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, location and
//! help text. Failing phases return a [`ParseError`] wrapping every
//! diagnostic they produced; succeeding phases hand their warnings back to
//! the caller.
//!
//! # Example
//!
//! ```
//! # use transit_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("state id `review` is declared more than once")
//!     .with_code(ErrorCode::E200)
//!     .with_location("/states/3/stateId")
//!     .with_help("rename one of the states");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use parse_error::Result;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
