//! Flattening of transition source shorthand into concrete flows.
//!
//! A [`Transition`] may start at one state, at a list of states, or at
//! every active state (the `"any"` wildcard). BPMN sequence flows always
//! have exactly one source, so each transition is expanded once, early,
//! into one [`Flow`] per concrete source.

use log::trace;

use transit_core::model::{State, Transition};

/// A single-source flow derived from a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    id: String,
    source: String,
    target: String,
    name: String,
    condition: String,
}

impl Flow {
    fn derive(transition: &Transition, id: String, source: &str) -> Self {
        Self {
            id,
            source: source.to_string(),
            target: transition.target().to_string(),
            name: transition.event_name().to_string(),
            condition: transition.condition().to_string(),
        }
    }

    /// Flow id. Equal to the transition id for scalar sources, otherwise
    /// `{transitionId}_{sourceId}`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Name of the transition's event, empty if it has none.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }
}

/// Expands one transition into its concrete flows.
///
/// `states` should be the annotated state list, since wildcard eligibility
/// is decided by each state's (possibly upgraded) base type.
pub fn expand_transition(transition: &Transition, states: &[State]) -> Vec<Flow> {
    let flows: Vec<Flow> = transition
        .concrete_sources(states)
        .into_iter()
        .map(|source| Flow::derive(transition, transition.flow_id(source), source))
        .collect();

    trace!(
        transition_id = transition.id(),
        source:% = transition.source(),
        flows = flows.len();
        "Expanded transition"
    );
    flows
}

/// Expands every transition, preserving transition order.
pub fn expand_all(transitions: &[Transition], states: &[State]) -> Vec<Flow> {
    transitions
        .iter()
        .flat_map(|transition| expand_transition(transition, states))
        .collect()
}

#[cfg(test)]
mod tests {
    use transit_core::model::{BaseStateType, Event, TransitionSource, Trigger};

    use super::*;

    fn states() -> Vec<State> {
        vec![
            State::new("start", "Start", BaseStateType::Initial),
            State::new("a", "A", BaseStateType::Intermediate),
            State::new("b", "B", BaseStateType::User),
            State::new("c", "C", BaseStateType::Decision),
            State::new("failed", "Failed", BaseStateType::Error),
            State::new("end", "End", BaseStateType::Final),
        ]
    }

    #[test]
    fn test_scalar_source_is_unchanged() {
        let transition = Transition::new("t1", TransitionSource::Single("a".to_string()), "b")
            .with_event(Event::new("e1", "next", Trigger::Auto))
            .with_condition("x > 1");

        let flows = expand_transition(&transition, &states());

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].id(), "t1");
        assert_eq!(flows[0].source(), "a");
        assert_eq!(flows[0].target(), "b");
        assert_eq!(flows[0].name(), "next");
        assert_eq!(flows[0].condition(), "x > 1");
    }

    #[test]
    fn test_list_source_fans_out() {
        let transition = Transition::new(
            "cancel",
            TransitionSource::Many(vec!["a".to_string(), "b".to_string()]),
            "end",
        );

        let flows = expand_transition(&transition, &states());

        let ids: Vec<_> = flows.iter().map(Flow::id).collect();
        assert_eq!(ids, ["cancel_a", "cancel_b"]);
        assert!(flows.iter().all(|flow| flow.target() == "end"));
        assert!(flows.iter().all(|flow| flow.name().is_empty()));
    }

    #[test]
    fn test_empty_list_produces_nothing() {
        let transition = Transition::new("t", TransitionSource::Many(Vec::new()), "end");
        assert!(expand_transition(&transition, &states()).is_empty());
    }

    #[test]
    fn test_wildcard_covers_active_states_only() {
        let transition = Transition::new("abort", TransitionSource::Wildcard, "failed")
            .with_event(Event::new("e", "abort", Trigger::Auto));

        let flows = expand_transition(&transition, &states());

        let sources: Vec<_> = flows.iter().map(Flow::source).collect();
        assert_eq!(sources, ["a", "b", "c"]);
        assert_eq!(flows[2].id(), "abort_c");
        assert!(flows.iter().all(|flow| flow.name() == "abort"));
    }

    #[test]
    fn test_expand_all_keeps_order() {
        let transitions = vec![
            Transition::new("t1", TransitionSource::Single("start".to_string()), "a"),
            Transition::new(
                "t2",
                TransitionSource::Many(vec!["a".to_string(), "c".to_string()]),
                "end",
            ),
        ];

        let ids: Vec<_> = expand_all(&transitions, &states())
            .iter()
            .map(|flow| flow.id().to_string())
            .collect();

        assert_eq!(ids, ["t1", "t2_a", "t2_c"]);
    }
}
