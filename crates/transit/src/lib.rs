//! Transit - bidirectional translation between state machines and BPMN.
//!
//! A state machine is a JSON document of states and transitions. Transit
//! turns it into an executable BPMN 2.0 process with a generated diagram
//! block, reads such a process back into a state machine, and renders
//! Mermaid views of a machine.
//!
//! # Pipeline
//!
//! ```text
//! JSON ──load/validate──► StateMachine ──annotate roles──► expand flows
//!                                                              │
//!      XML ◄──unparse── definitions tree ◄──layout/assemble────┘
//! ```
//!
//! The reverse direction parses XML into an element tree and reconstructs
//! states and transitions from the flow nodes and sequence flows.

pub mod analysis;
pub mod config;
pub mod expand;
pub mod export;
pub mod layout;
pub mod translate;

mod error;

pub use transit_core::{bpmn, document, geometry, model};

pub use error::TransitError;
pub use export::mermaid::MermaidKind;
pub use translate::{Translation, from_bpmn, to_bpmn};

use log::{debug, info, trace, warn};

use transit_parser::error::Diagnostic;

use config::AppConfig;
use model::StateMachine;

/// Facade for translating Transit documents.
///
/// Each method takes source text and runs the full pipeline for one
/// direction. Soft issues are returned as warnings next to the result;
/// structural problems abort with [`TransitError::Parse`].
///
/// # Examples
///
/// ```rust
/// use transit::{Translator, config::AppConfig};
///
/// let source = r#"{
///     "stateMachineId": "door",
///     "states": [
///         {"stateId": "closed", "name": "Closed", "baseStateType": "initial"},
///         {"stateId": "open", "name": "Open", "baseStateType": "final"}
///     ],
///     "transitions": [
///         {"transitionId": "t1", "fromStateId": "closed", "toStateId": "open"}
///     ]
/// }"#;
///
/// let translator = Translator::new(AppConfig::default());
/// let bpmn = translator.state_machine_to_bpmn(source).expect("Failed to translate");
/// assert!(bpmn.value().contains(r#"<startEvent id="closed" name="Closed"/>"#));
///
/// let back = translator
///     .bpmn_to_state_machine(bpmn.value())
///     .expect("Failed to translate back");
/// assert!(back.value().contains(r#""stateMachineId": "door""#));
/// ```
#[derive(Debug, Default)]
pub struct Translator {
    config: AppConfig,
}

impl Translator {
    /// Create a new translator with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout and validation settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load and validate a state-machine JSON document.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::Parse` for malformed JSON, missing required
    /// fields, duplicate ids, or unresolved references in strict mode.
    pub fn load_state_machine(
        &self,
        source: &str,
    ) -> Result<Translation<StateMachine>, TransitError> {
        info!("Loading state machine");

        let machine = transit_parser::load_state_machine(source)
            .map_err(|err| TransitError::new_parse_error(err, source))?;
        let warnings = self.validate(&machine, source)?;

        trace!(machine:?; "Validated state machine");
        Ok(Translation::new(machine, warnings))
    }

    /// Translate a state-machine JSON document into BPMN XML.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::Parse` if the document cannot be loaded or
    /// validated, or the tree cannot be serialized.
    pub fn state_machine_to_bpmn(
        &self,
        source: &str,
    ) -> Result<Translation<String>, TransitError> {
        let (machine, warnings) = self.load_state_machine(source)?.into_parts();

        let (definitions, translate_warnings) = to_bpmn(&machine, &self.config).into_parts();
        log_warnings(&translate_warnings);

        info!("Serializing BPMN document");
        let xml = transit_parser::unparse_document(&definitions)
            .map_err(|err| TransitError::new_parse_error(err, source))?;
        debug!(bytes = xml.len(); "BPMN document serialized");

        Ok(Translation::new(xml, warnings).with_warnings(translate_warnings))
    }

    /// Translate a BPMN XML document into state-machine JSON.
    ///
    /// The reconstructed machine is validated like a loaded one, so
    /// dangling `sourceRef`/`targetRef` values surface as warnings.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::Parse` for malformed XML, a missing
    /// `definitions` or `process` element, elements without ids, or
    /// validation errors of the reconstructed machine.
    pub fn bpmn_to_state_machine(
        &self,
        source: &str,
    ) -> Result<Translation<String>, TransitError> {
        info!("Loading BPMN document");

        let root = transit_parser::parse_document(source)
            .map_err(|err| TransitError::new_parse_error(err, source))?;
        let (machine, mut warnings) = from_bpmn(&root)
            .map_err(|err| TransitError::new_parse_error(err, source))?
            .into_parts();
        warnings.extend(self.validate(&machine, source)?);

        info!("Serializing state machine");
        let json = transit_parser::write_state_machine(&machine)
            .map_err(|err| TransitError::new_parse_error(err, source))?;

        Ok(Translation::new(json, warnings))
    }

    /// Render Mermaid diagrams of a state-machine JSON document as Markdown.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::Parse` if the document cannot be loaded or
    /// validated.
    pub fn state_machine_to_mermaid(
        &self,
        source: &str,
        kind: MermaidKind,
    ) -> Result<String, TransitError> {
        let machine = self.load_state_machine(source)?.into_value();

        info!(kind:? = kind; "Rendering Mermaid diagrams");
        Ok(export::mermaid::render_markdown(&machine, kind))
    }

    fn validate(
        &self,
        machine: &StateMachine,
        source: &str,
    ) -> Result<Vec<Diagnostic>, TransitError> {
        let config = self.config.validation().to_validate_config();
        transit_parser::validate_state_machine(machine, config)
            .map_err(|err| TransitError::new_parse_error(err, source))
    }
}

fn log_warnings(warnings: &[Diagnostic]) {
    for warning in warnings {
        warn!(code:? = warning.code(); "{}", warning.message());
    }
}
