//! Command-line argument definitions for the Transit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each [`Command`] selects a translation direction; the
//! global options control configuration file selection and logging
//! verbosity.

use clap::{Parser, Subcommand, ValueEnum};

use transit::MermaidKind;

/// Command-line arguments for the Transit translator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Translation to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a state-machine JSON file into a BPMN process
    ToBpmn {
        /// Path to the input state-machine JSON file
        input: String,

        /// Path to the output BPMN file
        #[arg(short, long, default_value = "out.bpmn")]
        output: String,
    },

    /// Translate a BPMN process into a state-machine JSON file
    ToModel {
        /// Path to the input BPMN file
        input: String,

        /// Path to the output JSON file
        #[arg(short, long, default_value = "out.json")]
        output: String,
    },

    /// Render Mermaid diagrams of a state-machine JSON file as Markdown
    Diagram {
        /// Path to the input state-machine JSON file
        input: String,

        /// Which diagrams to render
        #[arg(long, value_enum, default_value_t = DiagramKind::All)]
        kind: DiagramKind,

        /// Path to the output Markdown file; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Command {
    /// Path of the file the command reads.
    pub fn input(&self) -> &str {
        match self {
            Command::ToBpmn { input, .. }
            | Command::ToModel { input, .. }
            | Command::Diagram { input, .. } => input,
        }
    }
}

/// Diagram selection for the `diagram` command.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramKind {
    State,
    Sequence,
    All,
}

impl From<DiagramKind> for MermaidKind {
    fn from(kind: DiagramKind) -> Self {
        match kind {
            DiagramKind::State => MermaidKind::State,
            DiagramKind::Sequence => MermaidKind::Sequence,
            DiagramKind::All => MermaidKind::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_to_bpmn_defaults() {
        let args = Args::try_parse_from(["transit", "to-bpmn", "order.json"]).unwrap();

        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        match args.command {
            Command::ToBpmn { input, output } => {
                assert_eq!(input, "order.json");
                assert_eq!(output, "out.bpmn");
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "transit",
            "diagram",
            "order.json",
            "--kind",
            "sequence",
            "--config",
            "transit.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.config.as_deref(), Some("transit.toml"));
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.command.input(), "order.json");
        assert!(matches!(
            args.command,
            Command::Diagram {
                kind: DiagramKind::Sequence,
                output: None,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["transit", "order.json"]).is_err());
    }
}
