//! CLI logic for the Transit translator.
//!
//! This module contains the core CLI logic: it resolves configuration,
//! reads the input file, runs the selected translation and writes the
//! result.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, DiagramKind};

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use transit::{TransitError, Translation, Translator};

/// Run the Transit CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TransitError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Loading, validation and translation errors
pub fn run(args: &Args) -> Result<(), TransitError> {
    info!(input_path = args.command.input(); "Processing document");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(args.command.input())?;

    let translator = Translator::new(app_config);

    match &args.command {
        Command::ToBpmn { output, .. } => {
            let xml = report_warnings(translator.state_machine_to_bpmn(&source)?);
            fs::write(output, xml)?;
            info!(output_file = output; "BPMN exported successfully");
        }
        Command::ToModel { output, .. } => {
            let json = report_warnings(translator.bpmn_to_state_machine(&source)?);
            fs::write(output, json)?;
            info!(output_file = output; "State machine exported successfully");
        }
        Command::Diagram { kind, output, .. } => {
            let markdown = translator.state_machine_to_mermaid(&source, (*kind).into())?;
            match output {
                Some(path) => {
                    fs::write(path, markdown)?;
                    info!(output_file = path; "Diagrams exported successfully");
                }
                None => io::stdout().write_all(markdown.as_bytes())?,
            }
        }
    }

    Ok(())
}

fn report_warnings(translation: Translation<String>) -> String {
    if translation.has_warnings() {
        warn!(count = translation.warnings().len(); "Translated with warnings");
    }
    translation.into_value()
}
