//! State-machine JSON documents.

use log::{debug, trace};
use serde_json::error::Category;

use transit_core::model::StateMachine;

use crate::error::{Diagnostic, ErrorCode, ParseError};

/// Parses a state-machine JSON document.
///
/// Syntax errors are reported as [`ErrorCode::E001`]. A missing required
/// field (`stateMachineId`, `states`, `transitions`, `stateId`,
/// `transitionId`, ...) or a value of the wrong shape is reported as
/// [`ErrorCode::E002`].
pub fn load_state_machine(source: &str) -> Result<StateMachine, ParseError> {
    let machine: StateMachine = serde_json::from_str(source).map_err(json_diagnostic)?;

    debug!(
        state_machine_id = machine.id(),
        states = machine.states().len(),
        transitions = machine.transitions().len();
        "State machine loaded"
    );
    trace!(machine:?; "Loaded state machine");

    Ok(machine)
}

/// Serializes a state machine as pretty-printed JSON.
pub fn write_state_machine(machine: &StateMachine) -> Result<String, ParseError> {
    serde_json::to_string_pretty(machine).map_err(|err| {
        Diagnostic::error(format!("failed to serialize state machine: {err}"))
            .with_code(ErrorCode::E004)
            .into()
    })
}

fn json_diagnostic(err: serde_json::Error) -> ParseError {
    let location = format!("line {}, column {}", err.line(), err.column());
    let diagnostic = match err.classify() {
        Category::Data => Diagnostic::error(format!("invalid state machine document: {err}"))
            .with_code(ErrorCode::E002)
            .with_help(
                "a state machine needs `stateMachineId`, `states` and `transitions`; \
                 states need `stateId`, `name` and `baseStateType`",
            ),
        Category::Io | Category::Syntax | Category::Eof => {
            Diagnostic::error(format!("malformed JSON: {err}")).with_code(ErrorCode::E001)
        }
    };
    diagnostic.with_location(location).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_machine() {
        let machine = load_state_machine(
            r#"{"stateMachineId": "m", "version": 3, "states": [], "transitions": []}"#,
        )
        .unwrap();

        assert_eq!(machine.id(), "m");
        assert_eq!(machine.version(), 3);
    }

    #[test]
    fn test_syntax_error_is_e001() {
        let err = load_state_machine(r#"{"stateMachineId": "m", "#).unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
        assert!(err.diagnostics()[0].location().unwrap().starts_with("line 1"));
    }

    #[test]
    fn test_missing_states_is_e002() {
        let err = load_state_machine(r#"{"stateMachineId": "m", "transitions": []}"#).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E002));
        assert!(diag.message().contains("states"));
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_missing_state_id_is_e002() {
        let err = load_state_machine(
            r#"{
                "stateMachineId": "m",
                "states": [{"name": "A", "baseStateType": "initial"}],
                "transitions": []
            }"#,
        )
        .unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
        assert!(err.diagnostics()[0].message().contains("stateId"));
    }

    #[test]
    fn test_write_uses_document_field_names() {
        let machine = load_state_machine(
            r#"{
                "stateMachineId": "m",
                "states": [{"stateId": "a", "name": "A", "baseStateType": "initial"}],
                "transitions": [{"transitionId": "t", "fromStateId": "any", "toStateId": "a"}]
            }"#,
        )
        .unwrap();

        let json = write_state_machine(&machine).unwrap();

        assert!(json.contains(r#""stateMachineId": "m""#));
        assert!(json.contains(r#""fromStateId": "any""#));
        assert!(json.contains(r#""condition": "true""#));
    }
}
