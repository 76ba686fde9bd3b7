//! BPMN to state machine.
//!
//! Element names are matched by local name, so both the default-namespace
//! form written by [`to_bpmn`](super::to_bpmn) and prefixed documents
//! (`bpmn:process`, `bpmn:task`, ...) are accepted. Elements of kinds the
//! translator does not produce are ignored.

use log::{debug, info, trace};

use transit_core::{
    bpmn::{self, BpmnKind},
    document::Element,
    model::{
        ALWAYS_CONDITION, Event, State, StateMachine, StateType, Transition, TransitionSource,
        Trigger, WILDCARD_SOURCE,
    },
};
use transit_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

use super::Translation;

/// Machine name used when the process carries none.
pub const CONVERTED_NAME: &str = "Converted from BPMN";

/// Description given to every reconstructed machine.
pub const CONVERTED_DESCRIPTION: &str = "Converted from BPMN format";

/// Reconstructs a state machine from a BPMN `definitions` tree.
///
/// States are read kind by kind in [`BpmnKind::TABLE_ORDER`]. Every
/// sequence flow becomes a transition with a single-id source. A flow's
/// event exists only if the flow has a name; its trigger is `manual` when
/// the flow leaves a user task. Trigger metadata of the original machine
/// is therefore not always recovered. A flow leaving an element with id
/// `any` is kept as a single-id source and reported with an
/// [`ErrorCode::E303`] warning, since its JSON form means "any state".
///
/// # Errors
///
/// Returns a [`ParseError`] if the root is not `definitions`
/// ([`ErrorCode::E100`]), there is no `process` ([`ErrorCode::E101`]), a
/// flow node has no `id` ([`ErrorCode::E102`]) or a sequence flow lacks
/// `id`, `sourceRef` or `targetRef` ([`ErrorCode::E103`]).
pub fn from_bpmn(root: &Element) -> Result<Translation<StateMachine>, ParseError> {
    if root.local_name() != "definitions" {
        return Err(Diagnostic::error(format!(
            "expected a `definitions` root element, found `{}`",
            root.name()
        ))
        .with_code(ErrorCode::E100)
        .into());
    }

    let process = root.child("process").ok_or_else(|| {
        Diagnostic::error("BPMN document has no `process` element")
            .with_code(ErrorCode::E101)
            .with_location("/definitions")
    })?;

    let process_id = process.attribute("id").ok_or_else(|| {
        Diagnostic::error("`process` element has no `id` attribute")
            .with_code(ErrorCode::E102)
            .with_location("/definitions/process")
            .with_help("the process id becomes the stateMachineId")
    })?;

    info!(process_id = process_id; "Translating BPMN to state machine");

    let mut collector = DiagnosticCollector::new();
    let states = read_states(process, &mut collector);
    let transitions = read_transitions(process, &states, &mut collector);
    let warnings = collector.finish()?;

    let mut machine = StateMachine::new(process_id)
        .with_name(process.attribute("name").unwrap_or(CONVERTED_NAME))
        .with_description(CONVERTED_DESCRIPTION)
        .with_version(1);
    for state in states {
        machine = machine.with_state(state);
    }
    for transition in transitions {
        machine = machine.with_transition(transition);
    }

    debug!(
        states = machine.states().len(),
        transitions = machine.transitions().len();
        "State machine reconstructed"
    );

    Ok(Translation::new(machine, warnings))
}

fn read_states(process: &Element, collector: &mut DiagnosticCollector) -> Vec<State> {
    let mut states = Vec::new();

    for kind in BpmnKind::TABLE_ORDER {
        for (index, element) in process.children_named(kind.tag()).enumerate() {
            let Some(id) = element.attribute("id") else {
                collector.emit(
                    Diagnostic::error(format!("`{}` element has no `id` attribute", kind.tag()))
                        .with_code(ErrorCode::E102)
                        .with_location(format!("/definitions/process/{}[{index}]", kind.tag())),
                );
                continue;
            };

            states.push(read_state(kind, id, element));
        }
    }

    states
}

fn read_state(kind: BpmnKind, id: &str, element: &Element) -> State {
    let mut state = State::new(
        id,
        element.attribute("name").unwrap_or(id),
        bpmn::to_base_state_type(kind),
    )
    .with_state_type(kind.state_type());

    if let Some(documentation) = element.child("documentation").and_then(documentation_text) {
        state = state.with_description(documentation);
    }

    if kind == BpmnKind::BoundaryEvent {
        if let Some(attached_to) = element.attribute("attachedToRef") {
            state = state.with_attached_to(attached_to);
        }
    }

    trace!(state_id = id, kind:% = kind; "Read state");
    state
}

fn documentation_text(documentation: &Element) -> Option<&str> {
    documentation
        .text()
        .or_else(|| documentation.child("text").and_then(Element::text))
}

fn read_transitions(
    process: &Element,
    states: &[State],
    collector: &mut DiagnosticCollector,
) -> Vec<Transition> {
    let mut transitions = Vec::new();

    for (index, flow) in process.children_named("sequenceFlow").enumerate() {
        let (Some(id), Some(source), Some(target)) = (
            flow.attribute("id"),
            flow.attribute("sourceRef"),
            flow.attribute("targetRef"),
        ) else {
            collector.emit(
                Diagnostic::error("sequence flow needs `id`, `sourceRef` and `targetRef`")
                    .with_code(ErrorCode::E103)
                    .with_location(format!("/definitions/process/sequenceFlow[{index}]")),
            );
            continue;
        };

        if source == WILDCARD_SOURCE {
            collector.emit(
                Diagnostic::warning(format!(
                    "sequence flow `{id}` leaves element `{WILDCARD_SOURCE}`, which reads back as a wildcard source"
                ))
                .with_code(ErrorCode::E303)
                .with_location(format!("/definitions/process/sequenceFlow[{index}]/@sourceRef"))
                .with_help("rename the element so the transition keeps a single source"),
            );
        }

        let condition = flow
            .child("conditionExpression")
            .and_then(Element::text)
            .unwrap_or(ALWAYS_CONDITION);
        let mut transition =
            Transition::new(id, TransitionSource::Single(source.to_string()), target)
                .with_condition(condition);

        if let Some(name) = flow.attribute("name").filter(|name| !name.is_empty()) {
            let trigger = if leaves_user_task(source, states) {
                Trigger::Manual
            } else {
                Trigger::Auto
            };
            transition = transition.with_event(Event::new(format!("evt_{id}"), name, trigger));
        }

        transitions.push(transition);
    }

    transitions
}

fn leaves_user_task(source: &str, states: &[State]) -> bool {
    states
        .iter()
        .any(|state| state.id() == source && state.state_type() == Some(StateType::User))
}
