//! The canvas model: the authoritative in-memory diagram graph plus the
//! transient editing session around it.
//!
//! The model is split in two. [`Graph`] is document state: the keyed node and
//! connection collections that get snapshotted, serialized, and exported.
//! Session state (tool, selection, zoom, grid toggles) lives alongside it and
//! is never persisted. Mutations referencing unknown entities degrade to
//! silent no-ops; they only arise from stale interaction state, not from
//! user-facing mistakes.

use indexmap::IndexMap;
use log::{debug, warn};
use rand::Rng;

use vellum_core::{
    catalog::{self, Locale},
    geometry::{Grid, Point},
};

use crate::{
    config::{EditorConfig, PlacementConfig},
    document::{
        Connection, DiagramDocument, IdAllocator, Node, DEFAULT_FONT_SIZE, MAX_FONT_SIZE,
        MIN_FONT_SIZE,
    },
};

/// Zoom bounds and step, in percent.
pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 200;
pub const ZOOM_STEP: u16 = 10;

/// The active pointer tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    /// Press on a node selects and drags it.
    #[default]
    Select,
    /// Press on a node starts a connection; release on another completes it.
    Connect,
}

/// The current selection. At most one entity is selected at a time;
/// exclusivity between nodes and connections is structural.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Node(String),
    Connection(String),
}

impl Selection {
    /// Returns the selected node id, if a node is selected.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Node(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the selected connection id, if a connection is selected.
    pub fn connection_id(&self) -> Option<&str> {
        match self {
            Self::Connection(id) => Some(id),
            _ => None,
        }
    }

    /// Returns true when nothing is selected.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Document state: the keyed node and connection collections.
///
/// Insertion order is preserved and doubles as z-order: later nodes render on
/// top and win hit-tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    connections: IndexMap<String, Connection>,
}

impl Graph {
    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Looks up a connection by id.
    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Iterates nodes in insertion (z) order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates connections in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the topmost node whose bounding box contains the point.
    pub fn hit_test(&self, point: Point) -> Option<&Node> {
        self.nodes
            .values()
            .rev()
            .find(|node| node.bounds().contains(point))
    }

    /// Like [`hit_test`](Self::hit_test), but ignores one node. Used when
    /// completing a connection so the source never connects to itself.
    pub fn hit_test_excluding(&self, point: Point, exclude: &str) -> Option<&Node> {
        self.nodes
            .values()
            .rev()
            .find(|node| node.id != exclude && node.bounds().contains(point))
    }

    /// Returns the live line endpoints for a connection: the centers of the
    /// endpoint nodes' bounding boxes, recomputed from current positions.
    /// Returns `None` when either endpoint is missing.
    pub fn connection_endpoints(&self, connection: &Connection) -> Option<(Point, Point)> {
        let source = self.nodes.get(&connection.source)?;
        let target = self.nodes.get(&connection.target)?;
        Some((source.center(), target.center()))
    }

    fn remove_node_cascade(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }
        self.connections
            .retain(|_, connection| connection.source != id && connection.target != id);
        true
    }
}

/// Transient editing state. Never serialized.
#[derive(Debug, Clone, PartialEq)]
struct Session {
    tool: ToolMode,
    selection: Selection,
    zoom: u16,
    show_grid: bool,
    snap_to_grid: bool,
}

/// The canvas model: graph plus session, with the editing operations.
#[derive(Debug, Clone)]
pub struct CanvasModel {
    graph: Graph,
    session: Session,
    grid: Grid,
    placement: PlacementConfig,
    locale: Locale,
    ids: IdAllocator,
}

impl CanvasModel {
    /// Creates an empty canvas configured by the given editor config.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            graph: Graph::default(),
            session: Session {
                tool: ToolMode::default(),
                selection: Selection::None,
                zoom: 100,
                show_grid: config.grid().visible(),
                snap_to_grid: config.grid().snap(),
            },
            grid: Grid::new(config.grid().size()),
            placement: config.placement().clone(),
            locale: config.locale(),
            ids: IdAllocator::new(),
        }
    }

    /// Returns the document state.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Places a new node from the catalog template.
    ///
    /// When `position` is omitted, a pseudo-random spot inside the configured
    /// placement zone is chosen. The position is grid-snapped when snapping
    /// is enabled. Placement always succeeds; unknown shape ids fall back to
    /// the generic template but keep the requested tag.
    pub fn add_node(&mut self, shape_id: &str, position: Option<Point>) -> &Node {
        let template = catalog::lookup(shape_id);
        let size = template.kind.default_size();

        let position = position
            .filter(|point| point.is_finite())
            .unwrap_or_else(|| self.random_position());
        let position = self.apply_snap(position);

        let id = self.ids.node_id();
        let node = Node {
            id: id.clone(),
            shape: shape_id.to_string(),
            x: position.x(),
            y: position.y(),
            width: size.width(),
            height: size.height(),
            label: template.label(self.locale).to_string(),
            color: template.color.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        };

        debug!(node_id = id.as_str(), shape = shape_id; "Placed node");
        self.graph.nodes.insert(id.clone(), node);
        self.graph
            .node(&id)
            .expect("node was inserted immediately above")
    }

    /// Moves a node to a new position, applying grid snap when enabled.
    ///
    /// Unknown ids and non-finite positions are silent no-ops, preserving the
    /// finite-position invariant.
    pub fn move_node(&mut self, id: &str, position: Point) {
        if !position.is_finite() {
            return;
        }
        let snapped = self.apply_snap(position);
        if let Some(node) = self.graph.nodes.get_mut(id) {
            node.x = snapped.x();
            node.y = snapped.y();
        }
    }

    /// Creates a directed connection between two existing nodes.
    ///
    /// Returns `None`, mutating nothing, when the endpoints are equal or
    /// either id is unknown. Parallel duplicates of an existing ordered pair
    /// are allowed.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<&Connection> {
        if source == target {
            return None;
        }
        if !self.graph.nodes.contains_key(source) || !self.graph.nodes.contains_key(target) {
            return None;
        }

        let id = self.ids.connection_id();
        let connection = Connection {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            label: String::new(),
            style: Default::default(),
        };

        debug!(connection_id = id.as_str(), source = source, target = target; "Connected nodes");
        self.graph.connections.insert(id.clone(), connection);
        self.graph.connection(&id)
    }

    /// Applies a typed property edit to a node. Unknown ids are silent
    /// no-ops. Values are clamped to keep the model invariants: dimensions
    /// stay positive, font sizes stay within bounds.
    pub fn update_node_property(&mut self, id: &str, property: NodeProperty) {
        let Some(node) = self.graph.nodes.get_mut(id) else {
            return;
        };

        match property {
            NodeProperty::Label(label) => node.label = label,
            NodeProperty::Color(color) => node.color = color,
            NodeProperty::FontSize(size) => {
                node.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            }
            NodeProperty::Width(width) => {
                if width.is_finite() {
                    node.width = width.max(1.0);
                }
            }
            NodeProperty::Height(height) => {
                if height.is_finite() {
                    node.height = height.max(1.0);
                }
            }
        }
    }

    /// Deletes the selected entity and clears the selection.
    ///
    /// Deleting a node atomically cascades to every connection referencing
    /// it. Returns true when something was deleted.
    pub fn delete_selected(&mut self) -> bool {
        match std::mem::take(&mut self.session.selection) {
            Selection::Node(id) => {
                let removed = self.graph.remove_node_cascade(&id);
                if removed {
                    debug!(node_id = id.as_str(); "Deleted node and incident connections");
                }
                removed
            }
            Selection::Connection(id) => {
                let removed = self.graph.connections.shift_remove(&id).is_some();
                if removed {
                    debug!(connection_id = id.as_str(); "Deleted connection");
                }
                removed
            }
            Selection::None => false,
        }
    }

    /// Selects a node. Selecting clears any connection selection; unknown
    /// ids are silent no-ops.
    pub fn select_node(&mut self, id: &str) {
        if self.graph.nodes.contains_key(id) {
            self.session.selection = Selection::Node(id.to_string());
        }
    }

    /// Selects a connection. Selecting clears any node selection; unknown
    /// ids are silent no-ops.
    pub fn select_connection(&mut self, id: &str) {
        if self.graph.connections.contains_key(id) {
            self.session.selection = Selection::Connection(id.to_string());
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.session.selection = Selection::None;
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.session.selection
    }

    /// Replaces the graph wholesale, as undo/redo does. Selection referring
    /// to an entity that no longer exists is dropped.
    pub fn restore(&mut self, graph: Graph) {
        self.graph = graph;
        let stale = match &self.session.selection {
            Selection::Node(id) => !self.graph.nodes.contains_key(id),
            Selection::Connection(id) => !self.graph.connections.contains_key(id),
            Selection::None => false,
        };
        if stale {
            self.session.selection = Selection::None;
        }
    }

    /// Returns the active tool.
    pub fn tool(&self) -> ToolMode {
        self.session.tool
    }

    /// Switches the active tool.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.session.tool = tool;
    }

    /// Returns the zoom level in percent.
    pub fn zoom(&self) -> u16 {
        self.session.zoom
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: u16) {
        self.session.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Steps the zoom level up.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.session.zoom.saturating_add(ZOOM_STEP));
    }

    /// Steps the zoom level down.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.session.zoom.saturating_sub(ZOOM_STEP));
    }

    /// Returns the snap grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snap_to_grid(&self) -> bool {
        self.session.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.session.snap_to_grid = snap;
    }

    pub fn show_grid(&self) -> bool {
        self.session.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.session.show_grid = show;
    }

    /// Serializes the document state under the given title.
    pub fn to_document(&self, title: &str) -> DiagramDocument {
        DiagramDocument {
            title: title.to_string(),
            nodes: self.graph.nodes.values().cloned().collect(),
            connections: self.graph.connections.values().cloned().collect(),
        }
    }

    /// Replaces the canvas content with a previously stored document.
    ///
    /// Invariants are re-established on the way in: nodes with non-finite
    /// positions or non-positive dimensions are dropped, as are connections
    /// with missing endpoints or equal source and target. The id allocator
    /// advances past every loaded id so future allocations stay unique.
    pub fn load_document(&mut self, document: DiagramDocument) {
        let mut graph = Graph::default();

        for node in document.nodes {
            // Every id is observed, kept or not, so the allocator never
            // reissues one that appeared in the document.
            self.ids.observe(&node.id);
            if !node.origin().is_finite() || node.width <= 0.0 || node.height <= 0.0 {
                warn!(node_id = node.id.as_str(); "Dropping node with degenerate geometry");
                continue;
            }
            graph.nodes.insert(node.id.clone(), node);
        }

        for connection in document.connections {
            self.ids.observe(&connection.id);
            let dangling = !graph.nodes.contains_key(&connection.source)
                || !graph.nodes.contains_key(&connection.target);
            if dangling || connection.source == connection.target {
                warn!(connection_id = connection.id.as_str(); "Dropping invalid connection");
                continue;
            }
            graph.connections.insert(connection.id.clone(), connection);
        }

        self.session.selection = Selection::None;
        self.graph = graph;
    }

    fn apply_snap(&self, point: Point) -> Point {
        if self.session.snap_to_grid {
            self.grid.snap(point)
        } else {
            point
        }
    }

    fn random_position(&self) -> Point {
        let mut rng = rand::rng();
        let origin = self.placement.origin();
        let x = origin.x() + rng.random_range(0.0..self.placement.width().max(1.0));
        let y = origin.y() + rng.random_range(0.0..self.placement.height().max(1.0));
        Point::new(x, y)
    }
}

impl Default for CanvasModel {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

/// A typed node property edit.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeProperty {
    Label(String),
    Color(String),
    FontSize(u8),
    Width(f32),
    Height(f32),
}
