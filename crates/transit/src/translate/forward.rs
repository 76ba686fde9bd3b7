//! State machine to BPMN.

use log::{debug, info};

use transit_core::{
    bpmn::{
        self, BPMN_DI_NS, BPMN_MODEL_NS, BpmnKind, DC_NS, DI_NS, MODELER_NS, TARGET_NS, XSI_NS,
    },
    document::Element,
    geometry::{Bounds, Point},
    model::{ALWAYS_CONDITION, State, StateMachine, Transition},
};

use crate::{
    analysis,
    config::AppConfig,
    expand::{self, Flow},
    layout::{DiagramLayout, Edge, LayoutEngine},
};

use super::Translation;

/// Translates a state machine into a BPMN `definitions` tree.
///
/// Roles are inferred from the transitions first; the annotated states
/// drive element classification, wildcard expansion and boundary
/// attachment. Flow nodes are grouped by kind in
/// [`BpmnKind::EMISSION_ORDER`], followed by the sequence flows. The
/// diagram block is appended after the process.
///
/// Warnings report error states that are ambiguous to attach or cannot be
/// attached at all.
pub fn to_bpmn(machine: &StateMachine, config: &AppConfig) -> Translation<Element> {
    info!(state_machine_id = machine.id(); "Translating state machine to BPMN");

    let transitions = machine.transitions();
    let states = analysis::annotate_states(machine.states(), transitions);
    let warnings = analysis::attachment_warnings(&states, transitions);
    let flows = expand::expand_all(transitions, &states);

    let process = build_process(machine, &states, transitions, &flows);
    let layout = LayoutEngine::new(*config.layout()).layout(&states, transitions, &flows);
    let diagram = build_diagram(machine.id(), &layout);

    debug!(
        states = states.len(),
        flows = flows.len(),
        shapes = layout.shape_count(),
        edges = layout.edges().len(),
        warnings = warnings.len();
        "BPMN tree built"
    );

    let definitions = Element::new("definitions")
        .with_attribute("xmlns", BPMN_MODEL_NS)
        .with_attribute("xmlns:bpmndi", BPMN_DI_NS)
        .with_attribute("xmlns:dc", DC_NS)
        .with_attribute("xmlns:di", DI_NS)
        .with_attribute("xmlns:modeler", MODELER_NS)
        .with_attribute("xmlns:xsi", XSI_NS)
        .with_attribute("targetNamespace", TARGET_NS)
        .with_attribute("id", format!("Definitions_{}", machine.id()))
        .with_child(process)
        .with_child(diagram);

    Translation::new(definitions, warnings)
}

fn build_process(
    machine: &StateMachine,
    states: &[State],
    transitions: &[Transition],
    flows: &[Flow],
) -> Element {
    let mut process = Element::new("process")
        .with_attribute("id", machine.id())
        .with_attribute("isExecutable", "true");
    if let Some(name) = machine.name() {
        process.set_attribute("name", name);
    }

    for kind in BpmnKind::EMISSION_ORDER {
        for state in states
            .iter()
            .filter(|state| bpmn::to_bpmn_kind(state.base_state_type()) == kind)
        {
            process.push_child(flow_node(kind, state, states, transitions));
        }
    }

    for flow in flows {
        process.push_child(sequence_flow(flow));
    }

    process
}

fn flow_node(
    kind: BpmnKind,
    state: &State,
    states: &[State],
    transitions: &[Transition],
) -> Element {
    let mut element = Element::new(kind.tag())
        .with_attribute("id", state.id())
        .with_attribute("name", state.name());

    match kind {
        BpmnKind::ExclusiveGateway => element.set_attribute("gatewayDirection", "Diverging"),
        BpmnKind::BoundaryEvent => {
            if let Some(task) = analysis::find_attached_task(state.id(), transitions, states) {
                element.set_attribute("attachedToRef", task.id());
                element.set_attribute("cancelActivity", "true");
            }
        }
        _ => {}
    }

    if let Some(description) = state.description().filter(|text| !text.is_empty()) {
        element.push_child(Element::new("documentation").with_text(description));
    }

    element
}

fn sequence_flow(flow: &Flow) -> Element {
    let mut element = Element::new("sequenceFlow")
        .with_attribute("id", flow.id())
        .with_attribute("sourceRef", flow.source())
        .with_attribute("targetRef", flow.target());
    if !flow.name().is_empty() {
        element.set_attribute("name", flow.name());
    }

    if flow.condition() != ALWAYS_CONDITION {
        element.push_child(
            Element::new("conditionExpression")
                .with_attribute("xsi:type", "tFormalExpression")
                .with_text(flow.condition()),
        );
    }

    element
}

fn build_diagram(process_id: &str, layout: &DiagramLayout) -> Element {
    let shapes = layout.shapes().map(|(state_id, bounds)| shape(state_id, bounds));
    let edges = layout.edges().iter().map(edge);

    let plane = Element::new("bpmndi:BPMNPlane")
        .with_attribute("id", format!("BPMNPlane_{process_id}"))
        .with_attribute("bpmnElement", process_id)
        .with_children(shapes)
        .with_children(edges);

    Element::new("bpmndi:BPMNDiagram")
        .with_attribute("id", format!("BPMNDiagram_{process_id}"))
        .with_child(plane)
}

fn shape(state_id: &str, bounds: Bounds) -> Element {
    Element::new("bpmndi:BPMNShape")
        .with_attribute("id", format!("Shape_{state_id}"))
        .with_attribute("bpmnElement", state_id)
        .with_child(
            Element::new("dc:Bounds")
                .with_attribute("x", bounds.min_x().to_string())
                .with_attribute("y", bounds.min_y().to_string())
                .with_attribute("width", bounds.width().to_string())
                .with_attribute("height", bounds.height().to_string()),
        )
}

fn edge(edge: &Edge) -> Element {
    Element::new("bpmndi:BPMNEdge")
        .with_attribute("id", format!("Edge_{}", edge.flow_id()))
        .with_attribute("bpmnElement", edge.flow_id())
        .with_children(edge.waypoints().into_iter().map(waypoint))
}

fn waypoint(point: Point) -> Element {
    Element::new("di:waypoint")
        .with_attribute("x", point.x().to_string())
        .with_attribute("y", point.y().to_string())
}
