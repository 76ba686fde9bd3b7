//! Integration tests for the Translator API
//!
//! These tests drive whole documents through both translation directions.

use transit::{
    MermaidKind, TransitError, Translator,
    config::{AppConfig, LayoutConfig, ValidationConfig},
    document::Element,
    model::{BaseStateType, StateMachine, Trigger},
};
use transit_parser::{error::ErrorCode, load_state_machine, parse_document};

const MINIMAL: &str = r#"{
    "stateMachineId": "minimal",
    "name": "Minimal",
    "version": 2,
    "states": [
        {"stateId": "start", "name": "Start", "baseStateType": "initial"},
        {"stateId": "A", "name": "A", "baseStateType": "intermediate"},
        {"stateId": "end", "name": "End", "baseStateType": "final"}
    ],
    "transitions": [
        {"transitionId": "t1", "fromStateId": "start", "toStateId": "A"},
        {
            "transitionId": "t2",
            "fromStateId": "A",
            "toStateId": "end",
            "event": [{"eventId": "e2", "name": "finish", "trigger": "auto"}]
        }
    ]
}"#;

const BOUNDARY: &str = r#"{
    "stateMachineId": "boundary",
    "states": [
        {"stateId": "start", "name": "Start", "baseStateType": "initial"},
        {"stateId": "T", "name": "Task", "baseStateType": "intermediate"},
        {"stateId": "E", "name": "Failure", "baseStateType": "error"}
    ],
    "transitions": [
        {"transitionId": "t1", "fromStateId": "start", "toStateId": "T"},
        {"transitionId": "t2", "fromStateId": "T", "toStateId": "E"}
    ]
}"#;

fn round_trip(source: &str) -> StateMachine {
    let translator = Translator::default();
    let bpmn = translator
        .state_machine_to_bpmn(source)
        .expect("Failed to translate to BPMN");
    let json = translator
        .bpmn_to_state_machine(bpmn.value())
        .expect("Failed to translate back");
    load_state_machine(json.value()).expect("Reconstructed JSON should load")
}

fn diagram_bounds(xml: &str, state_id: &str) -> (f32, f32, f32, f32) {
    let root = parse_document(xml).expect("Output should be well-formed XML");
    let plane = root
        .child("BPMNDiagram")
        .and_then(|diagram| diagram.child("BPMNPlane"))
        .expect("Diagram block should exist");
    let bounds = plane
        .children_named("BPMNShape")
        .find(|shape| shape.attribute("bpmnElement") == Some(state_id))
        .and_then(|shape| shape.child("Bounds"))
        .expect("State should have a shape");
    let number = |key: &str| -> f32 {
        bounds
            .attribute(key)
            .and_then(|value| value.parse().ok())
            .expect("Bounds attribute should be numeric")
    };
    (number("x"), number("y"), number("width"), number("height"))
}

#[test]
fn test_translator_default_exists() {
    let translator = Translator::default();
    assert_eq!(translator.config().layout().origin_x(), 100.0);
}

#[test]
fn test_minimal_round_trip_preserves_structure() {
    let original = load_state_machine(MINIMAL).expect("Failed to load");
    let restored = round_trip(MINIMAL);

    assert_eq!(restored.id(), "minimal");
    assert_eq!(restored.name(), Some("Minimal"));
    assert_eq!(restored.version(), 1);

    for state in original.states() {
        let copy = restored
            .state(state.id())
            .unwrap_or_else(|| panic!("State {} should survive", state.id()));
        assert_eq!(copy.base_state_type(), state.base_state_type());
    }

    for (before, after) in original.transitions().iter().zip(restored.transitions()) {
        assert_eq!(after.id(), before.id());
        assert_eq!(after.source(), before.source());
        assert_eq!(after.target(), before.target());
    }
}

#[test]
fn test_missing_event_means_no_flow_name_and_no_reverse_event() {
    let translator = Translator::default();
    let bpmn = translator
        .state_machine_to_bpmn(MINIMAL)
        .expect("Failed to translate");

    assert!(
        bpmn.value()
            .contains(r#"<sequenceFlow id="t1" sourceRef="start" targetRef="A"/>"#)
    );
    assert!(bpmn.value().contains(r#"name="finish""#));

    let restored = round_trip(MINIMAL);
    assert!(restored.transitions()[0].events().is_empty());
    let finish = restored.transitions()[1].event().expect("Named flow keeps its event");
    assert_eq!(finish.name(), "finish");
    assert_eq!(finish.trigger(), Trigger::Auto);
}

#[test]
fn test_boundary_attached_at_task_bottom_right() {
    let translator = Translator::default();
    let bpmn = translator
        .state_machine_to_bpmn(BOUNDARY)
        .expect("Failed to translate");

    assert!(bpmn.value().contains(r#"attachedToRef="T""#));
    assert!(bpmn.warnings().is_empty());

    let (task_x, task_y, task_w, task_h) = diagram_bounds(bpmn.value(), "T");
    let (x, y, w, h) = diagram_bounds(bpmn.value(), "E");
    assert_eq!((w, h), (36.0, 36.0));
    assert_eq!(x + w / 2.0, task_x + task_w);
    assert_eq!(y + h / 2.0, task_y + task_h);

    let restored = round_trip(BOUNDARY);
    let error = restored.state("E").expect("Error state should survive");
    assert_eq!(error.base_state_type(), BaseStateType::Error);
    assert_eq!(error.attached_to(), Some("T"));
}

#[test]
fn test_manual_trigger_recovered_from_user_task() {
    let source = r#"{
        "stateMachineId": "approval",
        "states": [
            {"stateId": "draft", "name": "Draft", "baseStateType": "initial"},
            {"stateId": "review", "name": "Review", "baseStateType": "intermediate"},
            {"stateId": "done", "name": "Done", "baseStateType": "final"}
        ],
        "transitions": [
            {"transitionId": "t1", "fromStateId": "draft", "toStateId": "review"},
            {
                "transitionId": "t2",
                "fromStateId": "review",
                "toStateId": "done",
                "event": [{"eventId": "e", "name": "approve", "trigger": "manual"}]
            }
        ]
    }"#;

    let bpmn = Translator::default()
        .state_machine_to_bpmn(source)
        .expect("Failed to translate");
    assert!(bpmn.value().contains(r#"<userTask id="review" name="Review"/>"#));

    let restored = round_trip(source);
    assert_eq!(
        restored.state("review").map(|state| state.base_state_type()),
        Some(BaseStateType::User)
    );
    let approve = restored.transitions()[1].event().expect("Event expected");
    assert_eq!(approve.trigger(), Trigger::Manual);
}

#[test]
fn test_dangling_reference_is_a_warning_and_no_edge() {
    let source = r#"{
        "stateMachineId": "dangling",
        "states": [{"stateId": "a", "name": "A", "baseStateType": "initial"}],
        "transitions": [{"transitionId": "t1", "fromStateId": "a", "toStateId": "ghost"}]
    }"#;

    let bpmn = Translator::default()
        .state_machine_to_bpmn(source)
        .expect("Dangling references are tolerated by default");

    assert_eq!(bpmn.warnings().len(), 1);
    assert_eq!(bpmn.warnings()[0].code(), Some(ErrorCode::E202));
    assert!(bpmn.value().contains(r#"targetRef="ghost""#));
    assert!(!bpmn.value().contains("Edge_t1"));
}

#[test]
fn test_strict_references_reject_dangling_reference() {
    let source = r#"{
        "stateMachineId": "dangling",
        "states": [{"stateId": "a", "name": "A", "baseStateType": "initial"}],
        "transitions": [{"transitionId": "t1", "fromStateId": "a", "toStateId": "ghost"}]
    }"#;
    let config = AppConfig::new(LayoutConfig::default(), ValidationConfig::new(true));

    let result = Translator::new(config).state_machine_to_bpmn(source);

    match result {
        Err(TransitError::Parse { err, src }) => {
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E202));
            assert_eq!(src, source);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_colliding_flow_ids_abort_translation() {
    let source = r#"{
        "stateMachineId": "collide",
        "states": [
            {"stateId": "start", "name": "Start", "baseStateType": "initial"},
            {"stateId": "a", "name": "A", "baseStateType": "intermediate"},
            {"stateId": "end", "name": "End", "baseStateType": "final"}
        ],
        "transitions": [
            {"transitionId": "t_a", "fromStateId": "start", "toStateId": "a"},
            {"transitionId": "t", "fromStateId": "any", "toStateId": "end"},
            {"transitionId": "u", "fromStateId": ["a", "a"], "toStateId": "end"}
        ]
    }"#;

    let result = Translator::default().state_machine_to_bpmn(source);

    match result {
        Err(TransitError::Parse { err, .. }) => {
            let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
            assert_eq!(codes, [Some(ErrorCode::E204), Some(ErrorCode::E205)]);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_required_field_aborts() {
    let result = Translator::default().state_machine_to_bpmn(r#"{"stateMachineId": "x"}"#);
    assert!(matches!(result, Err(TransitError::Parse { .. })));
}

#[test]
fn test_reverse_rejects_non_bpmn() {
    let result = Translator::default().bpmn_to_state_machine("<html><body/></html>");

    match result {
        Err(TransitError::Parse { err, .. }) => {
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_mermaid_rendering() {
    let markdown = Translator::default()
        .state_machine_to_mermaid(MINIMAL, MermaidKind::State)
        .expect("Failed to render");

    assert!(markdown.contains("    [*] --> start"));
    assert!(markdown.contains("    start --> A: t1"));
    assert!(markdown.contains("    A --> end: finish"));
}

#[test]
fn test_translator_reusability() {
    let translator = Translator::default();

    let first = translator
        .state_machine_to_bpmn(MINIMAL)
        .expect("Failed to translate first");
    let second = translator
        .state_machine_to_bpmn(MINIMAL)
        .expect("Failed to translate second");

    assert_eq!(first.value(), second.value(), "Output should be deterministic");
    let root: Element = parse_document(first.value()).expect("Output should parse");
    assert_eq!(root.attribute("id"), Some("Definitions_minimal"));
}
