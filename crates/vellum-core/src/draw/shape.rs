//! Shape and connector primitive emission.

use svg::node::element as svg_element;

use crate::{
    catalog::ShapeKind,
    color::Color,
    draw::{LineStyle, SvgNode},
    geometry::{Bounds, Point, Size},
};

/// Marker id shared by every connection line's `marker-end` reference.
pub const ARROWHEAD_MARKER_ID: &str = "arrowhead";

/// Fill opacity applied to all node shapes.
const NODE_OPACITY: f32 = 0.9;

/// Corner radius for rectangle nodes.
const RECT_CORNER_RADIUS: f32 = 6.0;

/// Renders a node shape of the given kind with its top-left corner at
/// `origin`.
///
/// Circles use the node width as their diameter; diamonds are drawn as a
/// polygon through the midpoints of the bounding box edges; everything else
/// renders as a rounded rectangle.
pub fn render_node_shape(kind: ShapeKind, origin: Point, size: Size, fill: &Color) -> SvgNode {
    let bounds = Bounds::from_origin_size(origin, size);
    let center = bounds.center();

    match kind {
        ShapeKind::Circle => Box::new(
            svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", size.width() / 2.0)
                .set("fill", fill)
                .set("fill-opacity", NODE_OPACITY),
        ),
        ShapeKind::Diamond => {
            let points = format!(
                "{},{} {},{} {},{} {},{}",
                center.x(),
                bounds.min_y(),
                bounds.max_x(),
                center.y(),
                center.x(),
                bounds.max_y(),
                bounds.min_x(),
                center.y()
            );
            Box::new(
                svg_element::Polygon::new()
                    .set("points", points)
                    .set("fill", fill)
                    .set("fill-opacity", NODE_OPACITY),
            )
        }
        ShapeKind::Rectangle => Box::new(
            svg_element::Rectangle::new()
                .set("x", origin.x())
                .set("y", origin.y())
                .set("width", size.width())
                .set("height", size.height())
                .set("rx", RECT_CORNER_RADIUS)
                .set("fill", fill)
                .set("fill-opacity", NODE_OPACITY),
        ),
    }
}

/// Renders a connection line between two node centers, ending in the shared
/// arrowhead marker.
pub fn connection_line(from: Point, to: Point, style: LineStyle, color: &Color) -> SvgNode {
    let mut line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y())
        .set("stroke", color)
        .set("stroke-width", 2)
        .set("marker-end", format!("url(#{ARROWHEAD_MARKER_ID})"));

    if let Some(dasharray) = style.to_svg_value() {
        line = line.set("stroke-dasharray", dasharray);
    }

    Box::new(line)
}

/// Builds the arrowhead marker definition referenced by connection lines.
pub fn arrowhead_marker(color: &Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", ARROWHEAD_MARKER_ID)
        .set("markerWidth", 10)
        .set("markerHeight", 7)
        .set("refX", 9)
        .set("refY", 3.5)
        .set("orient", "auto")
        .add(
            svg_element::Polygon::new()
                .set("points", "0 0, 10 3.5, 0 7")
                .set("fill", color),
        )
}
