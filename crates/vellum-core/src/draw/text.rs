//! Label text emission.
//!
//! Node labels are centered inside the node's bounding box; connection labels
//! float slightly above the line midpoint.

use svg::node::element as svg_element;

use crate::{draw::SvgNode, geometry::Point};

/// Fill color for node labels.
const NODE_LABEL_FILL: &str = "white";

/// Fill color for connection labels.
const CONNECTION_LABEL_FILL: &str = "#94a3b8";

/// Font size for connection labels.
const CONNECTION_LABEL_SIZE: u8 = 11;

/// Baseline nudge so vertically centered text sits optically centered.
const BASELINE_OFFSET: f32 = 4.0;

/// Renders a node label centered on the given point.
pub fn node_label(center: Point, text: &str, font_size: u8) -> SvgNode {
    Box::new(
        svg_element::Text::new(text)
            .set("x", center.x())
            .set("y", center.y() + BASELINE_OFFSET)
            .set("text-anchor", "middle")
            .set("fill", NODE_LABEL_FILL)
            .set("font-size", font_size),
    )
}

/// Renders a connection label floating above the line midpoint.
pub fn connection_label(midpoint: Point, text: &str) -> SvgNode {
    Box::new(
        svg_element::Text::new(text)
            .set("x", midpoint.x())
            .set("y", midpoint.y() - 8.0)
            .set("text-anchor", "middle")
            .set("fill", CONNECTION_LABEL_FILL)
            .set("font-size", CONNECTION_LABEL_SIZE),
    )
}
