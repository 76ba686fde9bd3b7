//! Mermaid diagrams of a state machine.
//!
//! Two views are available:
//!
//! - a **state diagram** with one node per state and one arrow per
//!   concrete transition source, labelled with the event name;
//! - a **sequence diagram** showing a client driving the machine, with one
//!   participant per webhook service called from state entry actions.
//!
//! [`render_markdown`] wraps the selected views in fenced code blocks.

use std::collections::{BTreeMap, BTreeSet};

use transit_core::model::{BaseStateType, EntryAction, State, StateMachine, Transition};

/// Which diagrams to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MermaidKind {
    State,
    Sequence,
    #[default]
    All,
}

impl MermaidKind {
    fn includes_state(self) -> bool {
        matches!(self, MermaidKind::State | MermaidKind::All)
    }

    fn includes_sequence(self) -> bool {
        matches!(self, MermaidKind::Sequence | MermaidKind::All)
    }
}

/// Renders the selected diagrams as a Markdown document.
pub fn render_markdown(machine: &StateMachine, kind: MermaidKind) -> String {
    let mut sections = Vec::new();

    if kind.includes_state() {
        sections.push(fenced("State Diagram", &state_diagram(machine)));
    }
    if kind.includes_sequence() {
        sections.push(fenced("Sequence Diagram", &sequence_diagram(machine)));
    }

    sections.join("\n")
}

fn fenced(title: &str, body: &str) -> String {
    format!("# {title}\n```mermaid\n{body}\n```\n")
}

/// Renders a `stateDiagram-v2`.
///
/// A wildcard source is drawn from every active state.
pub fn state_diagram(machine: &StateMachine) -> String {
    let mut lines = vec!["stateDiagram-v2".to_string()];

    for state in machine.states() {
        match state.base_state_type() {
            BaseStateType::Initial => {
                lines.push(format!("    [*] --> {}", state.id()));
            }
            BaseStateType::Final => {
                lines.push(format!("    {} --> [*]", state.id()));
            }
            _ => {}
        }
        lines.push(format!("    {}: {}", state.id(), state.name()));
    }

    for transition in machine.transitions() {
        let text = label(transition);
        for source in transition.concrete_sources(machine.states()) {
            lines.push(format!("    {source} --> {}: {text}", transition.target()));
        }
    }

    lines.join("\n")
}

/// Renders a `sequenceDiagram`.
pub fn sequence_diagram(machine: &StateMachine) -> String {
    let mut lines = vec![
        "sequenceDiagram".to_string(),
        "    participant C as Client".to_string(),
        "    participant SM as State Machine".to_string(),
    ];

    // one participant per service, ordered by webhook url
    let services: BTreeMap<&str, String> = machine
        .states()
        .iter()
        .flat_map(State::entry_actions)
        .filter_map(EntryAction::webhook_target)
        .map(|webhook| (webhook.url(), webhook.service_name()))
        .collect();
    let mut declared = BTreeSet::new();
    for service in services.values() {
        if declared.insert(service) {
            lines.push(format!("    participant {service} as {service} Service"));
        }
    }

    for transition in machine.transitions() {
        let target = transition.target();
        lines.push(format!("    C->>+SM: {}", label(transition)));
        lines.push(format!(
            "    SM->>SM: Transition from {} to {target}",
            transition.source()
        ));

        let webhooks = machine
            .state(target)
            .into_iter()
            .flat_map(State::entry_actions)
            .filter_map(EntryAction::webhook_target);
        for webhook in webhooks {
            let service = webhook.service_name();
            lines.push(format!(
                "    SM->>+{service}: {} {}",
                webhook.method(),
                webhook.url()
            ));
            lines.push(format!("    {service}-->>-SM: Response"));
        }

        lines.push(format!("    SM-->>-C: State updated to {target}"));
        lines.push(String::new());
    }

    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Event name of the transition, or its id when it has no event.
fn label(transition: &Transition) -> &str {
    match transition.event_name() {
        "" => transition.id(),
        name => name,
    }
}
