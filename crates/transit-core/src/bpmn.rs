//! BPMN element kinds and their mapping to state types.
//!
//! The mapping is a fixed, bidirectional table:
//!
//! | Base state type | BPMN element       |
//! |-----------------|--------------------|
//! | `initial`       | `startEvent`       |
//! | `final`         | `endEvent`         |
//! | `intermediate`  | `task`             |
//! | `error`         | `boundaryEvent`    |
//! | `user`          | `userTask`         |
//! | `decision`      | `exclusiveGateway` |
//!
//! Lookups never fail: unmapped state types become `task` and unrecognized
//! element names become `intermediate`.

use std::fmt;

use crate::model::{BaseStateType, StateType};

/// BPMN 2.0 model namespace.
pub const BPMN_MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
/// BPMN 2.0 diagram interchange namespace.
pub const BPMN_DI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
/// OMG diagram-common namespace (bounds).
pub const DC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
/// OMG diagram-interchange namespace (waypoints).
pub const DI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
/// Camunda modeler namespace.
pub const MODELER_NS: &str = "http://camunda.org/schema/modeler/1.0";
/// XML schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Target namespace written on generated definitions.
pub const TARGET_NS: &str = "http://bpmn.io/schema/bpmn";

/// The flow-node kinds produced from, and read into, states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BpmnKind {
    StartEvent,
    EndEvent,
    Task,
    UserTask,
    ExclusiveGateway,
    BoundaryEvent,
}

impl BpmnKind {
    /// Order in which element groups are emitted inside a `process`.
    pub const EMISSION_ORDER: [BpmnKind; 6] = [
        BpmnKind::StartEvent,
        BpmnKind::Task,
        BpmnKind::UserTask,
        BpmnKind::ExclusiveGateway,
        BpmnKind::BoundaryEvent,
        BpmnKind::EndEvent,
    ];

    /// Order of the classification table, used when reading a process back.
    pub const TABLE_ORDER: [BpmnKind; 6] = [
        BpmnKind::StartEvent,
        BpmnKind::EndEvent,
        BpmnKind::Task,
        BpmnKind::BoundaryEvent,
        BpmnKind::UserTask,
        BpmnKind::ExclusiveGateway,
    ];

    /// Returns the XML element name of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            BpmnKind::StartEvent => "startEvent",
            BpmnKind::EndEvent => "endEvent",
            BpmnKind::Task => "task",
            BpmnKind::UserTask => "userTask",
            BpmnKind::ExclusiveGateway => "exclusiveGateway",
            BpmnKind::BoundaryEvent => "boundaryEvent",
        }
    }

    /// Parses an element name (without namespace prefix).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TABLE_ORDER.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The semantic state type a reconstructed state of this kind carries.
    pub fn state_type(self) -> StateType {
        match self {
            BpmnKind::ExclusiveGateway => StateType::Decision,
            BpmnKind::UserTask => StateType::User,
            _ => StateType::Process,
        }
    }
}

impl fmt::Display for BpmnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Maps a base state type to its BPMN element kind.
///
/// Types outside the table map to [`BpmnKind::Task`].
pub fn to_bpmn_kind(base_state_type: BaseStateType) -> BpmnKind {
    match base_state_type {
        BaseStateType::Initial => BpmnKind::StartEvent,
        BaseStateType::Final => BpmnKind::EndEvent,
        BaseStateType::Intermediate => BpmnKind::Task,
        BaseStateType::Error => BpmnKind::BoundaryEvent,
        BaseStateType::User => BpmnKind::UserTask,
        BaseStateType::Decision => BpmnKind::ExclusiveGateway,
        BaseStateType::Unknown => BpmnKind::Task,
    }
}

/// Maps a BPMN element kind back to its base state type.
pub fn to_base_state_type(kind: BpmnKind) -> BaseStateType {
    match kind {
        BpmnKind::StartEvent => BaseStateType::Initial,
        BpmnKind::EndEvent => BaseStateType::Final,
        BpmnKind::Task => BaseStateType::Intermediate,
        BpmnKind::BoundaryEvent => BaseStateType::Error,
        BpmnKind::UserTask => BaseStateType::User,
        BpmnKind::ExclusiveGateway => BaseStateType::Decision,
    }
}

/// Maps an element name to a base state type, defaulting to `intermediate`.
pub fn tag_to_base_state_type(tag: &str) -> BaseStateType {
    BpmnKind::from_tag(tag)
        .map(to_base_state_type)
        .unwrap_or(BaseStateType::Intermediate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_bidirectional() {
        for kind in BpmnKind::TABLE_ORDER {
            assert_eq!(to_bpmn_kind(to_base_state_type(kind)), kind);
        }
    }

    #[test]
    fn test_unknown_type_maps_to_task() {
        assert_eq!(to_bpmn_kind(BaseStateType::Unknown), BpmnKind::Task);
    }

    #[test]
    fn test_unknown_tag_maps_to_intermediate() {
        assert_eq!(
            tag_to_base_state_type("parallelGateway"),
            BaseStateType::Intermediate
        );
        assert_eq!(tag_to_base_state_type("startEvent"), BaseStateType::Initial);
    }

    #[test]
    fn test_tag_roundtrip() {
        for kind in BpmnKind::EMISSION_ORDER {
            assert_eq!(BpmnKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(BpmnKind::from_tag("sequenceFlow"), None);
    }

    #[test]
    fn test_emission_order() {
        let tags: Vec<_> = BpmnKind::EMISSION_ORDER
            .iter()
            .map(|kind| kind.tag())
            .collect();
        assert_eq!(
            tags,
            [
                "startEvent",
                "task",
                "userTask",
                "exclusiveGateway",
                "boundaryEvent",
                "endEvent"
            ]
        );
    }

    #[test]
    fn test_state_type_for_kind() {
        assert_eq!(
            BpmnKind::ExclusiveGateway.state_type(),
            StateType::Decision
        );
        assert_eq!(BpmnKind::UserTask.state_type(), StateType::User);
        assert_eq!(BpmnKind::BoundaryEvent.state_type(), StateType::Process);
    }
}
