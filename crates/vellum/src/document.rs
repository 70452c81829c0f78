//! The serializable document model: nodes, connections, and the diagram
//! document that crosses the persistence boundary.
//!
//! Wire format matches the editor's historical JSON blob: node shape tags
//! serialize as `"type"`, connection endpoints as `"from"`/`"to"`, and font
//! sizes as `"fontSize"`. Session state (selection, tool, zoom) never
//! appears here.

use serde::{Deserialize, Serialize};

use vellum_core::{
    catalog,
    draw::LineStyle,
    geometry::{Bounds, Point, Size},
};

/// Bounds for node font sizes, in CSS pixels.
pub const MIN_FONT_SIZE: u8 = 8;
pub const MAX_FONT_SIZE: u8 = 20;

/// Default font size for freshly placed nodes.
pub const DEFAULT_FONT_SIZE: u8 = 12;

/// A positioned, typed visual element on the canvas.
///
/// The id is unique within a diagram and immutable once created. Positions
/// are finite top-left-origin canvas coordinates; width and height are
/// always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Catalog template id. Unknown tags render with the generic fallback
    /// but are preserved as-is through serialization.
    #[serde(rename = "type")]
    pub shape: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    /// Fill color as a CSS string, validated at render time.
    pub color: String,
    #[serde(rename = "fontSize", default = "default_font_size")]
    pub font_size: u8,
}

fn default_font_size() -> u8 {
    DEFAULT_FONT_SIZE
}

impl Node {
    /// Returns the top-left corner of the node.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the node dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the node's axis-aligned bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.origin(), self.size())
    }

    /// Returns the geometric center of the node's bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Returns the geometric footprint the node renders with.
    pub fn kind(&self) -> catalog::ShapeKind {
        catalog::lookup(&self.shape).kind
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: LineStyle,
}

/// The serialized form of a diagram: title plus graph, all session state
/// stripped. This is what crosses the boundary to a
/// [`DiagramStore`](crate::persistence::DiagramStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub title: String,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl DiagramDocument {
    /// Serializes the document to its JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a document from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Allocates entity ids unique within one canvas model.
///
/// Ids are a short prefix plus a monotonic counter (`node-1`, `conn-2`, ...).
/// When a document produced elsewhere is loaded, [`observe`](Self::observe)
/// advances the counter past every numeric suffix already in use so freshly
/// allocated ids never collide with loaded ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh node id.
    pub fn node_id(&mut self) -> String {
        self.next += 1;
        format!("node-{}", self.next)
    }

    /// Allocates a fresh connection id.
    pub fn connection_id(&mut self) -> String {
        self.next += 1;
        format!("conn-{}", self.next)
    }

    /// Advances the counter past the numeric suffix of an existing id, if it
    /// has one.
    pub fn observe(&mut self, id: &str) {
        if let Some(digits) = id.rsplit('-').next() {
            if let Ok(value) = digits.parse::<u64>() {
                self.next = self.next.max(value);
            }
        }
    }
}
