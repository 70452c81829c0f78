//! SVG rendering of the diagram graph.
//!
//! The renderer is a pure projection: it reads the graph, emits layered
//! primitives through `vellum_core::draw`, and assembles a standalone SVG
//! document. Zoom is applied as a view-space transform on top of the
//! generated primitives; the model is never touched.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{node::element as svg_element, Document};

use vellum_core::{
    color::Color,
    draw::{self, Scene},
    geometry::{Bounds, Point},
};

use crate::{
    canvas::{CanvasModel, Graph},
    export,
};

/// Background color matching the editor canvas.
pub const DEFAULT_BACKGROUND: &str = "#0f172a";

/// Stroke color for connection lines and the arrowhead marker.
const CONNECTOR_COLOR: &str = "#64748b";

/// Padding around the diagram content.
const PADDING: f32 = 50.0;

/// Canvas size used when the diagram has no nodes.
const EMPTY_WIDTH: f32 = 200.0;
const EMPTY_HEIGHT: f32 = 120.0;

/// Renders the diagram graph to standalone SVG documents.
pub struct SvgExporter {
    background: Color,
}

impl SvgExporter {
    pub fn new() -> Self {
        Self {
            background: Color::parse_or_default(DEFAULT_BACKGROUND),
        }
    }

    /// Overrides the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Renders the graph into a self-contained SVG document.
    ///
    /// The document is sized to the tight bounding box over all nodes plus
    /// padding. An empty graph produces a minimal fixed-size document.
    pub fn render_graph(&self, graph: &Graph) -> Document {
        let (width, height, offset) = match self.scene_bounds(graph) {
            Some(bounds) => (
                bounds.width() + PADDING * 2.0,
                bounds.height() + PADDING * 2.0,
                Point::new(PADDING - bounds.min_x(), PADDING - bounds.min_y()),
            ),
            None => (EMPTY_WIDTH, EMPTY_HEIGHT, Point::new(0.0, 0.0)),
        };

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .add(
                svg_element::Definitions::new()
                    .add(draw::arrowhead_marker(&self.connector_color())),
            );

        for group in self.scene(graph, offset, width, height).into_groups() {
            document = document.add(group);
        }

        debug!(width = width, height = height; "Rendered SVG document");
        document
    }

    /// Renders the canvas for on-screen display, applying the session zoom
    /// as a scale transform around the generated primitives.
    pub fn render_view(&self, canvas: &CanvasModel) -> Document {
        let scale = f32::from(canvas.zoom()) / 100.0;
        let inner = self.render_graph(canvas.graph());

        let width = EMPTY_WIDTH.max(scene_width(canvas.graph()));
        let height = EMPTY_HEIGHT.max(scene_height(canvas.graph()));

        let view_width = width * scale;
        let view_height = height * scale;
        Document::new()
            .set("width", view_width)
            .set("height", view_height)
            .set("viewBox", format!("0 0 {view_width} {view_height}"))
            .add(
                svg_element::Group::new()
                    .set("transform", format!("scale({scale})"))
                    .add(inner),
            )
    }

    /// Writes an SVG document to the specified file.
    pub fn write_document(&self, document: &Document, file_name: &str) -> Result<(), export::Error> {
        info!(file_name = file_name; "Creating SVG file");
        let file = match File::create(file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&file, "{document}") {
            error!(file_name = file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }

    /// Tight bounding box over all nodes, or `None` for an empty graph.
    fn scene_bounds(&self, graph: &Graph) -> Option<Bounds> {
        graph
            .nodes()
            .map(|node| node.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    fn connector_color(&self) -> Color {
        Color::parse_or_default(CONNECTOR_COLOR)
    }

    /// Builds the scene: background, connections, nodes, and labels,
    /// translated by `offset` into document space.
    fn scene(&self, graph: &Graph, offset: Point, width: f32, height: f32) -> Scene {
        let mut scene = Scene::new();

        scene.push_background(Box::new(
            svg_element::Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", &self.background),
        ));

        let connector = self.connector_color();
        for connection in graph.connections() {
            // Dangling connections cannot survive a cascade delete, but a
            // stale snapshot must not break rendering.
            let Some((from, to)) = graph.connection_endpoints(connection) else {
                debug!(connection_id = connection.id.as_str(); "Skipping connection with missing endpoint");
                continue;
            };
            let from = from.add_point(offset);
            let to = to.add_point(offset);

            scene.push_connection(draw::connection_line(from, to, connection.style, &connector));
            if !connection.label.is_empty() {
                scene.push_label(draw::connection_label(from.midpoint(to), &connection.label));
            }
        }

        for node in graph.nodes() {
            let origin = node.origin().add_point(offset);
            let fill = Color::parse_or_default(&node.color);
            scene.push_node(draw::render_node_shape(node.kind(), origin, node.size(), &fill));
            scene.push_label(draw::node_label(
                Bounds::from_origin_size(origin, node.size()).center(),
                &node.label,
                node.font_size,
            ));
        }

        scene
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn scene_width(graph: &Graph) -> f32 {
    graph
        .nodes()
        .map(|node| node.bounds())
        .reduce(|acc, bounds| acc.merge(&bounds))
        .map(|bounds| bounds.width() + PADDING * 2.0)
        .unwrap_or(EMPTY_WIDTH)
}

fn scene_height(graph: &Graph) -> f32 {
    graph
        .nodes()
        .map(|node| node.bounds())
        .reduce(|acc, bounds| acc.merge(&bounds))
        .map(|bounds| bounds.height() + PADDING * 2.0)
        .unwrap_or(EMPTY_HEIGHT)
}
