//! Text notations generated from a state machine.
//!
//! # Available Backends
//!
//! - [`mermaid`]: Mermaid `stateDiagram-v2` and `sequenceDiagram` text
//!   wrapped in a Markdown document.

pub mod mermaid;
