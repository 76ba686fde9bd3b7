//! Error codes for the Transit diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document loading errors
//! - `E1xx` - BPMN structure errors
//! - `E2xx` - Model validation errors
//! - `E3xx` - Translation diagnostics

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Loading Errors (E0xx)
    // =========================================================================
    /// Malformed JSON.
    ///
    /// The state-machine document is not syntactically valid JSON.
    E001,

    /// Schema violation.
    ///
    /// A required field is missing or a field holds a value of the wrong
    /// shape (for example a number where a state id is expected).
    E002,

    /// Malformed XML.
    ///
    /// The BPMN document is not well-formed XML.
    E003,

    /// Serialization failure.
    ///
    /// A translated model could not be written back to text.
    E004,

    // =========================================================================
    // BPMN Structure Errors (E1xx)
    // =========================================================================
    /// Missing `definitions` root.
    ///
    /// The document root is not a BPMN `definitions` element.
    E100,

    /// Missing `process` element.
    ///
    /// The `definitions` element contains no `process`.
    E101,

    /// Element without an id.
    ///
    /// A process or flow-node element lacks its `id` attribute.
    E102,

    /// Incomplete sequence flow.
    ///
    /// A `sequenceFlow` lacks `id`, `sourceRef` or `targetRef`.
    E103,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Duplicate state id.
    ///
    /// Two states share the same `stateId`.
    E200,

    /// Duplicate transition id.
    ///
    /// Two transitions share the same `transitionId`.
    E201,

    /// Unresolved state reference.
    ///
    /// A transition names a `stateId` that no state declares. Reported as a
    /// warning unless strict reference checking is enabled.
    E202,

    /// Empty source list.
    ///
    /// A transition's `fromStateId` is an empty list and expands to nothing.
    E203,

    /// Repeated source list entry.
    ///
    /// A transition's `fromStateId` list names the same state twice, which
    /// would expand into two sequence flows with the same id.
    E204,

    /// Flow id collision.
    ///
    /// Two transitions expand into sequence flows with the same id, for
    /// example `t` from `"any"` next to a transition named `t_a`.
    E205,

    // =========================================================================
    // Translation Diagnostics (E3xx)
    // =========================================================================
    /// Ambiguous boundary attachment.
    ///
    /// More than one transition enters an error state; the first one decides
    /// which task the boundary event is attached to.
    E300,

    /// Detached boundary event.
    ///
    /// No transition into an error state comes from a known state, so the
    /// boundary event has no task to attach to and is left out of the diagram.
    E301,

    /// Unknown base state type.
    ///
    /// A state's `baseStateType` is not recognized; it is treated as
    /// `intermediate`.
    E302,

    /// Wildcard literal source.
    ///
    /// A BPMN sequence flow leaves an element whose id is `any`. The
    /// reconstructed transition keeps it as a single id, but the JSON form
    /// of that source reads back as a wildcard.
    E303,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Loading errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // BPMN structure errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Validation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            // Translation diagnostics
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Loading errors
            ErrorCode::E001 => "malformed JSON",
            ErrorCode::E002 => "schema violation",
            ErrorCode::E003 => "malformed XML",
            ErrorCode::E004 => "serialization failure",
            // BPMN structure errors
            ErrorCode::E100 => "missing definitions root",
            ErrorCode::E101 => "missing process element",
            ErrorCode::E102 => "element without id",
            ErrorCode::E103 => "incomplete sequence flow",
            // Validation errors
            ErrorCode::E200 => "duplicate state id",
            ErrorCode::E201 => "duplicate transition id",
            ErrorCode::E202 => "unresolved state reference",
            ErrorCode::E203 => "empty source list",
            ErrorCode::E204 => "repeated source list entry",
            ErrorCode::E205 => "flow id collision",
            // Translation diagnostics
            ErrorCode::E300 => "ambiguous boundary attachment",
            ErrorCode::E301 => "detached boundary event",
            ErrorCode::E302 => "unknown base state type",
            ErrorCode::E303 => "wildcard literal source",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "schema violation");
        assert_eq!(ErrorCode::E202.description(), "unresolved state reference");
        assert_eq!(ErrorCode::E300.description(), "ambiguous boundary attachment");
    }
}
