//! # Transit Parser
//!
//! Loading and validation of the documents Transit translates between.
//! This crate provides:
//!
//! - [`load_state_machine`] / [`write_state_machine`] for state-machine JSON
//! - [`validate_state_machine`] for model invariants
//! - [`parse_document`] / [`unparse_document`] for XML text and
//!   [`Element`](transit_core::document::Element) trees
//! - the [`error`] diagnostic system shared by every Transit crate
//!
//! ## Usage
//!
//! ```
//! # use transit_parser::{load_state_machine, validate_state_machine, ValidateConfig};
//! # use transit_parser::error::ParseError;
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "stateMachineId": "door",
//!         "states": [
//!             {"stateId": "closed", "name": "Closed", "baseStateType": "initial"},
//!             {"stateId": "open", "name": "Open", "baseStateType": "final"}
//!         ],
//!         "transitions": [
//!             {"transitionId": "t1", "fromStateId": "closed", "toStateId": "open"}
//!         ]
//!     }"#;
//!
//!     let machine = load_state_machine(source)?;
//!     let warnings = validate_state_machine(&machine, ValidateConfig::default())?;
//!     assert!(warnings.is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;

mod json;
mod validate;
mod xml;

pub use json::{load_state_machine, write_state_machine};
pub use validate::{ValidateConfig, validate_state_machine};
pub use xml::{parse_document, unparse_document};
