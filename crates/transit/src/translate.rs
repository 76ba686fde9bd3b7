//! Model translation between state machines and BPMN element trees.
//!
//! - [`to_bpmn`] builds a `definitions` tree with a process and its diagram
//!   block from a [`StateMachine`](transit_core::model::StateMachine).
//! - [`from_bpmn`] reconstructs a state machine from such a tree.
//!
//! Both directions return a [`Translation`]: the translated value together
//! with the soft issues noticed on the way.

mod forward;
mod reverse;

pub use forward::to_bpmn;
pub use reverse::{CONVERTED_DESCRIPTION, CONVERTED_NAME, from_bpmn};

use transit_parser::error::Diagnostic;

/// A translated value and the warnings produced while translating it.
#[derive(Debug, Clone)]
pub struct Translation<T> {
    value: T,
    warnings: Vec<Diagnostic>,
}

impl<T> Translation<T> {
    pub fn new(value: T, warnings: Vec<Diagnostic>) -> Self {
        Self { value, warnings }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.warnings)
    }

    /// Appends warnings from a later phase.
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}
