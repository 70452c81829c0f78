//! Z-ordered assembly of the diagram scene.
//!
//! The canvas stacks in a fixed order: background fill, connection lines,
//! node shapes, text labels. [`Scene`] keeps one bucket per stratum and
//! emits them bottom to top, so rendering code can walk the graph in any
//! order and still get lines under shapes and labels on top.

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// The diagram scene, bucketed by stacking order.
///
/// Within a bucket, primitives keep their insertion order, so later nodes
/// paint over earlier ones the same way the canvas does.
#[derive(Default)]
pub struct Scene {
    background: Vec<SvgNode>,
    connections: Vec<SvgNode>,
    nodes: Vec<SvgNode>,
    labels: Vec<SvgNode>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a background primitive, drawn under everything else.
    pub fn push_background(&mut self, node: SvgNode) {
        self.background.push(node);
    }

    /// Adds a connection line, drawn under node shapes.
    pub fn push_connection(&mut self, node: SvgNode) {
        self.connections.push(node);
    }

    /// Adds a node shape.
    pub fn push_node(&mut self, node: SvgNode) {
        self.nodes.push(node);
    }

    /// Adds a text label, drawn on top of everything.
    pub fn push_label(&mut self, node: SvgNode) {
        self.labels.push(node);
    }

    /// Returns `true` when no stratum holds any primitive.
    pub fn is_empty(&self) -> bool {
        self.background.is_empty()
            && self.connections.is_empty()
            && self.nodes.is_empty()
            && self.labels.is_empty()
    }

    /// Emits the scene bottom to top, one `<g>` element per non-empty
    /// stratum, tagged with a `data-layer` attribute.
    pub fn into_groups(self) -> Vec<SvgNode> {
        [
            ("background", self.background),
            ("connections", self.connections),
            ("nodes", self.nodes),
            ("labels", self.labels),
        ]
        .into_iter()
        .filter(|(_, stratum)| !stratum.is_empty())
        .map(|(name, stratum)| {
            let mut group = svg_element::Group::new().set("data-layer", name);
            for node in stratum {
                group = group.add(node);
            }
            Box::new(group) as SvgNode
        })
        .collect()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("background", &self.background.len())
            .field("connections", &self.connections.len())
            .field("nodes", &self.nodes.len())
            .field("labels", &self.labels.len())
            .finish()
    }
}
