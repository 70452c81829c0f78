//! SVG primitive emission for diagram rendering and export.
//!
//! The draw module turns model-level facts (a node of some kind at some
//! position, a connection between two centers) into `svg` crate nodes. The
//! [`Scene`] collector owns z-ordering, so callers can emit primitives in
//! any order and still get connections drawn under nodes and labels drawn
//! on top.

mod layer;
mod shape;
mod stroke;
mod text;

pub use layer::{Scene, SvgNode};
pub use shape::{arrowhead_marker, connection_line, render_node_shape, ARROWHEAD_MARKER_ID};
pub use stroke::LineStyle;
pub use text::{connection_label, node_label};
