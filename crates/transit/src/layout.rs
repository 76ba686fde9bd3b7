//! Deterministic diagram layout.
//!
//! The [`LayoutEngine`] assigns a box to every placeable state and a pair
//! of waypoints to every flow whose endpoints were both placed. Placement
//! is a pure function of state order and the [`LayoutConfig`] grid:
//!
//! 1. **Primary pass**: non-error states are placed left to right on a
//!    wrapping grid, sized by role.
//! 2. **Boundary pass**: each error state gets a small box centered on the
//!    bottom-right corner of the task it is attached to.
//! 3. **Edge pass**: flows run from the source's right-middle point to the
//!    target's left-middle point, or to the top-middle point of a boundary
//!    box.
//!
//! States that could not be placed (an error state with no attachable
//! task) and flows touching them or unknown states are left out of the
//! diagram. They remain part of the process model.

use indexmap::IndexMap;
use log::{debug, trace};

use transit_core::{
    geometry::{Bounds, Point, Size},
    model::{BaseStateType, State, Transition},
};

use crate::{analysis, config::LayoutConfig, expand::Flow};

const EVENT_SIZE: f32 = 36.0;
const GATEWAY_SIZE: f32 = 50.0;
const TASK_WIDTH: f32 = 120.0;
const TASK_HEIGHT: f32 = 80.0;

/// Returns the shape size used for a state of the given (annotated) type.
pub fn shape_size(base_state_type: BaseStateType) -> Size {
    match base_state_type {
        BaseStateType::Initial | BaseStateType::Final | BaseStateType::Error => {
            Size::square(EVENT_SIZE)
        }
        BaseStateType::Decision => Size::square(GATEWAY_SIZE),
        BaseStateType::Intermediate | BaseStateType::User | BaseStateType::Unknown => {
            Size::new(TASK_WIDTH, TASK_HEIGHT)
        }
    }
}

/// A connector between two placed shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    flow_id: String,
    start: Point,
    end: Point,
}

impl Edge {
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Waypoints in drawing order.
    pub fn waypoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// The result of a layout run.
#[derive(Debug, Clone, Default)]
pub struct DiagramLayout {
    shapes: IndexMap<String, Bounds>,
    edges: Vec<Edge>,
}

impl DiagramLayout {
    /// Placed shapes keyed by state id, in placement order.
    pub fn shapes(&self) -> impl Iterator<Item = (&str, Bounds)> {
        self.shapes
            .iter()
            .map(|(state_id, bounds)| (state_id.as_str(), *bounds))
    }

    /// Returns the box of a placed state.
    pub fn shape(&self, state_id: &str) -> Option<Bounds> {
        self.shapes.get(state_id).copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

/// Places states and routes flows on a fixed grid.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Computes the diagram layout.
    ///
    /// Roles are inferred again from `transitions` before sizing, so the
    /// result does not depend on whether `states` was annotated already.
    /// `flows` are the expanded flows of `transitions`.
    pub fn layout(
        &self,
        states: &[State],
        transitions: &[Transition],
        flows: &[Flow],
    ) -> DiagramLayout {
        let states = analysis::annotate_states(states, transitions);

        let mut shapes = self.place_states(&states);
        place_boundaries(&mut shapes, &states, transitions);
        let edges = route_edges(&shapes, &states, flows);

        debug!(shapes = shapes.len(), edges = edges.len(); "Diagram laid out");
        DiagramLayout { shapes, edges }
    }

    fn place_states(&self, states: &[State]) -> IndexMap<String, Bounds> {
        let config = &self.config;
        let mut shapes = IndexMap::new();
        let mut cursor = Point::new(config.origin_x(), config.origin_y());

        for state in states
            .iter()
            .filter(|state| state.base_state_type() != BaseStateType::Error)
        {
            let bounds = cursor.to_bounds(shape_size(state.base_state_type()));
            trace!(state_id = state.id(), x = bounds.min_x(), y = bounds.min_y(); "Placed state");
            shapes.insert(state.id().to_string(), bounds);

            cursor = cursor.add_point(Point::new(config.horizontal_spacing(), 0.0));
            if cursor.x() > config.max_row_x() {
                cursor = Point::new(config.origin_x(), cursor.y() + config.vertical_spacing());
            }
        }

        shapes
    }
}

fn place_boundaries(
    shapes: &mut IndexMap<String, Bounds>,
    states: &[State],
    transitions: &[Transition],
) {
    for state in states
        .iter()
        .filter(|state| state.base_state_type() == BaseStateType::Error)
    {
        let Some(task) = analysis::find_attached_task(state.id(), transitions, states) else {
            trace!(state_id = state.id(); "Boundary state has no task; left out of diagram");
            continue;
        };
        let Some(task_bounds) = shapes.get(task.id()).copied() else {
            trace!(state_id = state.id(), task_id = task.id(); "Attached task was not placed");
            continue;
        };

        let bounds = Bounds::new_from_center(task_bounds.max_point(), Size::square(EVENT_SIZE));
        trace!(
            state_id = state.id(),
            task_id = task.id(),
            x = bounds.min_x(),
            y = bounds.min_y();
            "Placed boundary state"
        );
        shapes.insert(state.id().to_string(), bounds);
    }
}

fn route_edges(shapes: &IndexMap<String, Bounds>, states: &[State], flows: &[Flow]) -> Vec<Edge> {
    flows
        .iter()
        .filter_map(|flow| {
            let (Some(source), Some(target)) =
                (shapes.get(flow.source()), shapes.get(flow.target()))
            else {
                trace!(flow_id = flow.id(); "Flow endpoint not placed; edge omitted");
                return None;
            };

            let boundary_target = states
                .iter()
                .find(|state| state.id() == flow.target())
                .is_some_and(|state| state.base_state_type() == BaseStateType::Error);
            let end = if boundary_target {
                target.top_mid()
            } else {
                target.left_mid()
            };

            Some(Edge {
                flow_id: flow.id().to_string(),
                start: source.right_mid(),
                end,
            })
        })
        .collect()
}
