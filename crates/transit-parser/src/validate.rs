//! Model validation.
//!
//! Checks the invariants the translator relies on:
//!
//! - state ids and transition ids are unique (errors)
//! - every explicitly named source and target state exists (warnings, or
//!   errors under [`ValidateConfig::strict_references`])
//! - list-valued sources are not empty (warning) and name each state once
//!   (error)
//! - the sequence flows the transitions expand into have distinct ids
//!   (error)
//! - base state types are recognized (warning)

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use transit_core::model::{BaseStateType, StateMachine, TransitionSource};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

/// Configuration for model validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateConfig {
    strict_references: bool,
}

impl ValidateConfig {
    /// Creates a validation configuration.
    ///
    /// # Arguments
    ///
    /// * `strict_references` - Report unresolved state references as errors
    ///   instead of warnings.
    pub fn new(strict_references: bool) -> Self {
        Self { strict_references }
    }

    pub fn strict_references(&self) -> bool {
        self.strict_references
    }
}

/// Validates a state machine.
///
/// Returns the warnings found, or a [`ParseError`] carrying every
/// diagnostic when at least one error was found.
pub fn validate_state_machine(
    machine: &StateMachine,
    config: ValidateConfig,
) -> Result<Vec<Diagnostic>, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let mut state_ids = HashSet::new();
    for (index, state) in machine.states().iter().enumerate() {
        if !state_ids.insert(state.id()) {
            collector.emit(
                Diagnostic::error(format!("state id `{}` is declared more than once", state.id()))
                    .with_code(ErrorCode::E200)
                    .with_location(format!("/states/{index}/stateId"))
                    .with_help("state ids must be unique within a state machine"),
            );
        }

        if state.base_state_type() == BaseStateType::Unknown {
            collector.emit(
                Diagnostic::warning(format!(
                    "state `{}` has an unrecognized base state type",
                    state.id()
                ))
                .with_code(ErrorCode::E302)
                .with_location(format!("/states/{index}/baseStateType"))
                .with_help(
                    "expected one of initial, final, intermediate, error, user, decision; \
                     the state is treated as intermediate",
                ),
            );
        }
    }

    let mut transition_ids = HashSet::new();
    for (index, transition) in machine.transitions().iter().enumerate() {
        if !transition_ids.insert(transition.id()) {
            collector.emit(
                Diagnostic::error(format!(
                    "transition id `{}` is declared more than once",
                    transition.id()
                ))
                .with_code(ErrorCode::E201)
                .with_location(format!("/transitions/{index}/transitionId"))
                .with_help("transition ids must be unique within a state machine"),
            );
        }

        if matches!(transition.source(), TransitionSource::Many(ids) if ids.is_empty()) {
            collector.emit(
                Diagnostic::warning(format!(
                    "transition `{}` has an empty source list and produces no flows",
                    transition.id()
                ))
                .with_code(ErrorCode::E203)
                .with_location(format!("/transitions/{index}/fromStateId")),
            );
        }

        let mut listed = HashSet::new();
        for (position, source_id) in transition.source().ids().iter().enumerate() {
            if !listed.insert(source_id.as_str()) {
                collector.emit(
                    Diagnostic::error(format!(
                        "transition `{}` lists source state `{source_id}` more than once",
                        transition.id()
                    ))
                    .with_code(ErrorCode::E204)
                    .with_location(format!("/transitions/{index}/fromStateId/{position}"))
                    .with_help("each listed source becomes its own sequence flow"),
                );
            }
        }

        for source_id in transition.source().ids() {
            if !state_ids.contains(source_id.as_str()) {
                collector.emit(unresolved(
                    config,
                    format!(
                        "transition `{}` starts at unknown state `{source_id}`",
                        transition.id()
                    ),
                    format!("/transitions/{index}/fromStateId"),
                    source_id,
                ));
            }
        }

        if !state_ids.contains(transition.target()) {
            collector.emit(unresolved(
                config,
                format!(
                    "transition `{}` targets unknown state `{}`",
                    transition.id(),
                    transition.target()
                ),
                format!("/transitions/{index}/toStateId"),
                transition.target(),
            ));
        }
    }

    check_flow_ids(machine, &mut collector);

    let warnings = collector.finish()?;
    for warning in &warnings {
        warn!(code:? = warning.code(), location:? = warning.location(); "{}", warning.message());
    }
    debug!(warnings = warnings.len(); "State machine validated");
    Ok(warnings)
}

/// Reports flow ids produced by two different transitions.
///
/// Repeats inside one transition are covered by E200, E201 and E204.
fn check_flow_ids(machine: &StateMachine, collector: &mut DiagnosticCollector) {
    let transitions = machine.transitions();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (index, transition) in transitions.iter().enumerate() {
        for source in transition.concrete_sources(machine.states()) {
            let flow_id = transition.flow_id(source);
            match owners.get(&flow_id) {
                Some(&owner) => {
                    let other = &transitions[owner];
                    if owner != index && other.id() != transition.id() {
                        collector.emit(
                            Diagnostic::error(format!(
                                "transitions `{}` and `{}` both produce sequence flow `{flow_id}`",
                                other.id(),
                                transition.id()
                            ))
                            .with_code(ErrorCode::E205)
                            .with_location(format!("/transitions/{index}/transitionId"))
                            .with_help(
                                "list and `any` sources produce flows named \
                                 `{transitionId}_{sourceId}`; rename one of the transitions",
                            ),
                        );
                    }
                }
                None => {
                    owners.insert(flow_id, index);
                }
            }
        }
    }
}

fn unresolved(
    config: ValidateConfig,
    message: String,
    location: String,
    state_id: &str,
) -> Diagnostic {
    let diagnostic = if config.strict_references {
        Diagnostic::error(message)
    } else {
        Diagnostic::warning(message)
    };
    diagnostic
        .with_code(ErrorCode::E202)
        .with_location(location)
        .with_help(format!(
            "declare a state with stateId `{state_id}`; the flow is kept in the process \
             but left out of the diagram"
        ))
}
