//! State-machine model types.
//!
//! A [`StateMachine`] owns its [`State`]s and [`Transition`]s. Transitions
//! refer to states by their `stateId`; they never own them.
//!
//! All types serialize with the camel-case field names used by the JSON
//! state-machine document format:
//!
//! ```
//! # use transit_core::model::{StateMachine, TransitionSource};
//! let json = r#"{
//!     "stateMachineId": "order",
//!     "states": [
//!         {"stateId": "start", "name": "Start", "baseStateType": "initial"},
//!         {"stateId": "done", "name": "Done", "baseStateType": "final"}
//!     ],
//!     "transitions": [
//!         {"transitionId": "t1", "fromStateId": "start", "toStateId": "done"}
//!     ]
//! }"#;
//!
//! let machine: StateMachine = serde_json::from_str(json).unwrap();
//! assert_eq!(machine.states().len(), 2);
//! assert_eq!(
//!     machine.transitions()[0].source(),
//!     &TransitionSource::Single("start".to_string())
//! );
//! assert_eq!(machine.transitions()[0].condition(), "true");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The literal used in `fromStateId` to mean "any active state".
pub const WILDCARD_SOURCE: &str = "any";

/// The condition expression that always holds.
pub const ALWAYS_CONDITION: &str = "true";

/// A complete state-machine description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachine {
    state_machine_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default = "default_version")]
    version: u32,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

fn default_version() -> u32 {
    1
}

impl StateMachine {
    /// Creates a state machine with the given id and no states or transitions.
    pub fn new(state_machine_id: impl Into<String>) -> Self {
        Self {
            state_machine_id: state_machine_id.into(),
            name: None,
            description: None,
            version: default_version(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn id(&self) -> &str {
        &self.state_machine_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the state with the given id, if it exists.
    pub fn state(&self, state_id: &str) -> Option<&State> {
        self.states.iter().find(|state| state.id() == state_id)
    }
}

/// The declared type of a state.
///
/// `Decision` and `User` may also be inferred from the transition graph,
/// in which case an annotation pass upgrades the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseStateType {
    Initial,
    Final,
    Intermediate,
    Error,
    User,
    Decision,
    /// A type string that none of the other variants recognize.
    #[serde(other)]
    Unknown,
}

impl BaseStateType {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseStateType::Initial => "initial",
            BaseStateType::Final => "final",
            BaseStateType::Intermediate => "intermediate",
            BaseStateType::Error => "error",
            BaseStateType::User => "user",
            BaseStateType::Decision => "decision",
            BaseStateType::Unknown => "unknown",
        }
    }

    /// Returns `true` for states that a wildcard (`"any"`) source can leave.
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            BaseStateType::Initial | BaseStateType::Final | BaseStateType::Error
        )
    }
}

impl fmt::Display for BaseStateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic role of a state, derived at translation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateType {
    Process,
    Decision,
    User,
}

/// A single state of the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    state_id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    base_state_type: BaseStateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state_type: Option<StateType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attached_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    entry_actions: Vec<EntryAction>,
    #[serde(default = "default_data", skip_serializing_if = "Value::is_null")]
    data: Value,
}

/// The data block given to states that do not declare one.
pub fn default_data() -> Value {
    serde_json::json!({
        "schema": {
            "type": "object",
            "properties": {}
        }
    })
}

impl State {
    pub fn new(
        state_id: impl Into<String>,
        name: impl Into<String>,
        base_state_type: BaseStateType,
    ) -> Self {
        Self {
            state_id: state_id.into(),
            name: name.into(),
            description: None,
            base_state_type,
            state_type: None,
            attached_to: None,
            entry_actions: Vec::new(),
            data: default_data(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_state_type(mut self, state_type: StateType) -> Self {
        self.state_type = Some(state_type);
        self
    }

    pub fn with_attached_to(mut self, attached_to: impl Into<String>) -> Self {
        self.attached_to = Some(attached_to.into());
        self
    }

    pub fn with_entry_action(mut self, action: EntryAction) -> Self {
        self.entry_actions.push(action);
        self
    }

    /// Returns a copy of this state with a different base type.
    pub fn with_base_state_type(mut self, base_state_type: BaseStateType) -> Self {
        self.base_state_type = base_state_type;
        self
    }

    pub fn id(&self) -> &str {
        &self.state_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn base_state_type(&self) -> BaseStateType {
        self.base_state_type
    }

    pub fn state_type(&self) -> Option<StateType> {
        self.state_type
    }

    pub fn attached_to(&self) -> Option<&str> {
        self.attached_to.as_deref()
    }

    pub fn entry_actions(&self) -> &[EntryAction] {
        &self.entry_actions
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// An action run when a state is entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryAction {
    #[serde(default)]
    trigger: ActionTrigger,
}

impl EntryAction {
    /// Creates an action that calls the given webhook.
    pub fn webhook(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            trigger: ActionTrigger {
                webhook: Some(Webhook {
                    url: url.into(),
                    method: method.into(),
                }),
            },
        }
    }

    pub fn webhook_target(&self) -> Option<&Webhook> {
        self.trigger.webhook.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ActionTrigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook: Option<Webhook>,
}

/// An outbound HTTP call made by an entry action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    url: String,
    #[serde(default = "default_method")]
    method: String,
}

fn default_method() -> String {
    "POST".to_string()
}

impl Webhook {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Service name derived from the last path segment of the URL, capitalized.
    pub fn service_name(&self) -> String {
        let segment = self.url.rsplit('/').next().unwrap_or_default();
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

/// Where a transition starts.
///
/// In JSON this is a state id, a list of state ids, or the literal `"any"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSource", into = "RawSource")]
pub enum TransitionSource {
    Single(String),
    Many(Vec<String>),
    /// Every active state (see [`BaseStateType::is_active`]).
    Wildcard,
}

impl TransitionSource {
    /// Returns `true` if the source names `state_id` explicitly.
    ///
    /// A wildcard never matches.
    pub fn matches(&self, state_id: &str) -> bool {
        match self {
            TransitionSource::Single(id) => id == state_id,
            TransitionSource::Many(ids) => ids.iter().any(|id| id == state_id),
            TransitionSource::Wildcard => false,
        }
    }

    /// Returns the explicitly named source ids in declaration order.
    pub fn ids(&self) -> &[String] {
        match self {
            TransitionSource::Single(id) => std::slice::from_ref(id),
            TransitionSource::Many(ids) => ids,
            TransitionSource::Wildcard => &[],
        }
    }
}

impl fmt::Display for TransitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionSource::Single(id) => f.write_str(id),
            TransitionSource::Many(ids) => write!(f, "[{}]", ids.join(", ")),
            TransitionSource::Wildcard => f.write_str(WILDCARD_SOURCE),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSource {
    One(String),
    Many(Vec<String>),
}

impl From<RawSource> for TransitionSource {
    fn from(raw: RawSource) -> Self {
        match raw {
            RawSource::One(id) if id == WILDCARD_SOURCE => TransitionSource::Wildcard,
            RawSource::One(id) => TransitionSource::Single(id),
            RawSource::Many(ids) => TransitionSource::Many(ids),
        }
    }
}

impl From<TransitionSource> for RawSource {
    fn from(source: TransitionSource) -> Self {
        match source {
            TransitionSource::Single(id) => RawSource::One(id),
            TransitionSource::Many(ids) => RawSource::Many(ids),
            TransitionSource::Wildcard => RawSource::One(WILDCARD_SOURCE.to_string()),
        }
    }
}

/// A directed transition between states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    transition_id: String,
    #[serde(rename = "fromStateId")]
    source: TransitionSource,
    #[serde(rename = "toStateId")]
    target: String,
    #[serde(default)]
    event: Vec<Event>,
    #[serde(default = "default_condition")]
    condition: String,
}

fn default_condition() -> String {
    ALWAYS_CONDITION.to_string()
}

impl Transition {
    pub fn new(
        transition_id: impl Into<String>,
        source: TransitionSource,
        target: impl Into<String>,
    ) -> Self {
        Self {
            transition_id: transition_id.into(),
            source,
            target: target.into(),
            event: Vec::new(),
            condition: default_condition(),
        }
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.event.push(event);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.transition_id
    }

    pub fn source(&self) -> &TransitionSource {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn events(&self) -> &[Event] {
        &self.event
    }

    /// The meaningful event of this transition: the first one, if any.
    pub fn event(&self) -> Option<&Event> {
        self.event.first()
    }

    /// Name of the first event, or an empty string.
    pub fn event_name(&self) -> &str {
        self.event().map(Event::name).unwrap_or_default()
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Returns `true` if the condition is the literal `"true"`.
    pub fn is_unconditional(&self) -> bool {
        self.condition == ALWAYS_CONDITION
    }

    /// Concrete source state ids: the named ids in declaration order, or
    /// every active state for a wildcard.
    pub fn concrete_sources<'a>(&'a self, states: &'a [State]) -> Vec<&'a str> {
        match &self.source {
            TransitionSource::Wildcard => states
                .iter()
                .filter(|state| state.base_state_type().is_active())
                .map(State::id)
                .collect(),
            source => source.ids().iter().map(String::as_str).collect(),
        }
    }

    /// Id of the flow leaving `source`: the transition id for a scalar
    /// source, `{transitionId}_{source}` otherwise.
    pub fn flow_id(&self, source: &str) -> String {
        match self.source {
            TransitionSource::Single(_) => self.transition_id.clone(),
            _ => format!("{}_{source}", self.transition_id),
        }
    }
}

/// How an event is fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Manual,
    #[default]
    Auto,
}

/// An event that fires a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    event_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    trigger: Trigger,
}

impl Event {
    pub fn new(event_id: impl Into<String>, name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            event_id: event_id.into(),
            name: name.into(),
            description: String::new(),
            trigger,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn is_manual(&self) -> bool {
        self.trigger == Trigger::Manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_deserialize_variants() {
        let single: TransitionSource = serde_json::from_str(r#""a""#).unwrap();
        let many: TransitionSource = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        let any: TransitionSource = serde_json::from_str(r#""any""#).unwrap();

        assert_eq!(single, TransitionSource::Single("a".to_string()));
        assert_eq!(
            many,
            TransitionSource::Many(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(any, TransitionSource::Wildcard);
    }

    #[test]
    fn test_source_serialize_wildcard() {
        let json = serde_json::to_string(&TransitionSource::Wildcard).unwrap();
        assert_eq!(json, r#""any""#);
    }

    #[test]
    fn test_source_matches() {
        let many = TransitionSource::Many(vec!["a".to_string(), "b".to_string()]);

        assert!(many.matches("b"));
        assert!(!many.matches("c"));
        assert!(!TransitionSource::Wildcard.matches("any"));
        assert!(TransitionSource::Wildcard.ids().is_empty());
    }

    #[test]
    fn test_unknown_base_state_type() {
        let state: State = serde_json::from_str(
            r#"{"stateId": "s", "name": "S", "baseStateType": "parallel"}"#,
        )
        .unwrap();

        assert_eq!(state.base_state_type(), BaseStateType::Unknown);
    }

    #[test]
    fn test_transition_defaults() {
        let transition: Transition =
            serde_json::from_str(r#"{"transitionId": "t", "fromStateId": "a", "toStateId": "b"}"#)
                .unwrap();

        assert!(transition.events().is_empty());
        assert_eq!(transition.event_name(), "");
        assert!(transition.is_unconditional());
    }

    #[test]
    fn test_event_trigger_defaults_to_auto() {
        let event: Event = serde_json::from_str(r#"{"eventId": "e", "name": "go"}"#).unwrap();

        assert_eq!(event.trigger(), Trigger::Auto);
        assert!(!event.is_manual());
    }

    #[test]
    fn test_missing_machine_id_is_rejected() {
        let result: Result<StateMachine, _> =
            serde_json::from_str(r#"{"states": [], "transitions": []}"#);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("stateMachineId"));
    }

    #[test]
    fn test_webhook_service_name() {
        let action = EntryAction::webhook("https://api.example.com/v1/billing", "POST");

        assert_eq!(action.webhook_target().unwrap().service_name(), "Billing");
    }

    #[test]
    fn test_state_serialization_skips_empty_fields() {
        let state = State::new("a", "A", BaseStateType::Intermediate);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["stateId"], "a");
        assert_eq!(json["baseStateType"], "intermediate");
        assert!(json.get("description").is_none());
        assert!(json.get("entryActions").is_none());
        assert_eq!(json["data"]["schema"]["type"], "object");
    }

    #[test]
    fn test_concrete_sources_and_flow_ids() {
        let states = [
            State::new("start", "Start", BaseStateType::Initial),
            State::new("a", "A", BaseStateType::Intermediate),
            State::new("fail", "Fail", BaseStateType::Error),
            State::new("b", "B", BaseStateType::User),
        ];
        let single = Transition::new("t1", TransitionSource::Single("start".to_string()), "a");
        let any = Transition::new("cancel", TransitionSource::Wildcard, "fail");

        assert_eq!(single.concrete_sources(&states), ["start"]);
        assert_eq!(single.flow_id("start"), "t1");
        assert_eq!(any.concrete_sources(&states), ["a", "b"]);
        assert_eq!(any.flow_id("b"), "cancel_b");
    }
}
