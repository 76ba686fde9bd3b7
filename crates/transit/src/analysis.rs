//! Structural role inference over the transition graph.
//!
//! Roles are computed properties, never cached: every forward translation
//! runs [`annotate_states`] again, so a changed transition list can never
//! leave a stale `decision` or `user` tag behind.
//!
//! - A state is a **decision point** iff more than one transition leaves it.
//! - A state is a **user task** iff a transition leaving it carries a
//!   manual event.
//! - An **error** state is attached to the task its first incoming
//!   transition comes from.
//!
//! Only explicitly named sources count. A wildcard (`"any"`) source adds no
//! out-degree to any state and never makes a state a user task.

use log::trace;

use transit_core::model::{BaseStateType, State, StateType, Transition};
use transit_parser::error::{Diagnostic, ErrorCode};

/// Number of transitions leaving `state_id`.
///
/// A list-valued source counts once for each entry naming the state.
pub fn out_degree(state_id: &str, transitions: &[Transition]) -> usize {
    transitions
        .iter()
        .map(|transition| {
            transition
                .source()
                .ids()
                .iter()
                .filter(|id| id.as_str() == state_id)
                .count()
        })
        .sum()
}

/// Returns `true` if more than one transition leaves `state_id`.
pub fn is_decision_point(state_id: &str, transitions: &[Transition]) -> bool {
    out_degree(state_id, transitions) > 1
}

/// Returns `true` if any transition leaving `state` carries a manual event.
pub fn is_user_task(state: &State, transitions: &[Transition]) -> bool {
    transitions
        .iter()
        .filter(|transition| transition.source().matches(state.id()))
        .flat_map(Transition::events)
        .any(|event| event.is_manual())
}

/// Finds the task an error state's boundary event attaches to.
///
/// Scans `transitions` in order for the first one entering
/// `error_state_id` whose source names a known state. For a list-valued
/// source the first listed known state is used; wildcard sources are
/// skipped. When several transitions enter the error state, the first
/// match wins.
pub fn find_attached_task<'a>(
    error_state_id: &str,
    transitions: &[Transition],
    states: &'a [State],
) -> Option<&'a State> {
    transitions
        .iter()
        .filter(|transition| transition.target() == error_state_id)
        .find_map(|transition| {
            transition
                .source()
                .ids()
                .iter()
                .find_map(|source_id| states.iter().find(|state| state.id() == source_id))
        })
}

/// Returns a copy of `states` with inferred roles applied.
///
/// Each state's `stateType` is set to `decision`, `user` or `process`.
/// Decision points and user tasks also have their base state type upgraded
/// so they classify as gateways and user tasks. When both roles apply,
/// `user` wins.
pub fn annotate_states(states: &[State], transitions: &[Transition]) -> Vec<State> {
    states
        .iter()
        .map(|state| {
            let decision = is_decision_point(state.id(), transitions);
            let user = is_user_task(state, transitions);

            let (base_state_type, state_type) = if user {
                (BaseStateType::User, StateType::User)
            } else if decision {
                (BaseStateType::Decision, StateType::Decision)
            } else {
                (state.base_state_type(), StateType::Process)
            };

            if base_state_type != state.base_state_type() {
                trace!(
                    state_id = state.id(),
                    from:% = state.base_state_type(),
                    to:% = base_state_type;
                    "Upgraded state role"
                );
            }

            state
                .clone()
                .with_base_state_type(base_state_type)
                .with_state_type(state_type)
        })
        .collect()
}

/// Reports boundary attachments that are ambiguous or impossible.
///
/// `states` should already be annotated. Produces an
/// [`ErrorCode::E300`] warning for every error state entered by more than
/// one transition and an [`ErrorCode::E301`] warning for every error state
/// without an attachable task.
pub fn attachment_warnings(states: &[State], transitions: &[Transition]) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    for state in states
        .iter()
        .filter(|state| state.base_state_type() == BaseStateType::Error)
    {
        let incoming: Vec<&Transition> = transitions
            .iter()
            .filter(|transition| transition.target() == state.id())
            .collect();

        match find_attached_task(state.id(), transitions, states) {
            Some(task) if incoming.len() > 1 => {
                let sources: Vec<String> = incoming
                    .iter()
                    .map(|transition| transition.source().to_string())
                    .collect();
                warnings.push(
                    Diagnostic::warning(format!(
                        "error state `{}` is entered from {} transitions; attaching it to `{}`",
                        state.id(),
                        incoming.len(),
                        task.id()
                    ))
                    .with_code(ErrorCode::E300)
                    .with_help(format!(
                        "incoming sources in order: {}; the first one decides",
                        sources.join(", ")
                    )),
                );
            }
            Some(_) => {}
            None => warnings.push(
                Diagnostic::warning(format!(
                    "error state `{}` has no task to attach to",
                    state.id()
                ))
                .with_code(ErrorCode::E301)
                .with_help(
                    "add a transition from a task into the error state; until then it is \
                     emitted as a boundary event without a diagram shape",
                ),
            ),
        }
    }

    warnings
}
