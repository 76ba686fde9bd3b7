//! Transit Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Transit
//! translator. It includes:
//!
//! - **Model**: The state-machine description ([`model::StateMachine`])
//! - **BPMN**: Element kinds and the state type classification table ([`bpmn`] module)
//! - **Geometry**: Basic geometric types for diagram interchange ([`geometry`] module)
//! - **Document**: A generic structured-document tree ([`document::Element`])

pub mod bpmn;
pub mod document;
pub mod geometry;
pub mod model;
