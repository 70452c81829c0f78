//! Vellum - An embeddable 2D diagram-editing engine.
//!
//! Canvas-based node/connection editing with pointer-driven dragging and
//! connecting, grid snapping, linear undo/redo, and SVG/PDF export. The
//! engine owns the diagram state and its editing rules; rendering surfaces,
//! storage backends, and UI chrome stay outside and talk to it through
//! [`DiagramEditor`].

pub mod canvas;
pub mod config;
pub mod document;
pub mod export;
pub mod history;
pub mod interaction;
pub mod persistence;

mod error;

pub use vellum_core::{catalog, color, draw, geometry};

pub use error::VellumError;

use log::{debug, info, warn};

use vellum_core::geometry::Point;

use canvas::{CanvasModel, NodeProperty, Selection, ToolMode};
use config::EditorConfig;
use document::DiagramDocument;
use export::{pdf::PdfExporter, svg::SvgExporter};
use history::History;
use interaction::InteractionController;
use persistence::DiagramStore;

/// An editing session over one diagram.
///
/// The editor ties the canvas model, the pointer gesture controller, and the
/// undo/redo history together behind one API. Mutations made through the
/// editor commit history snapshots at the right moments: one per placed
/// node, completed drag, completed connection, or deletion.
///
/// # Examples
///
/// ```rust
/// use vellum::{DiagramEditor, geometry::Point};
///
/// let mut editor = DiagramEditor::default();
///
/// let server = editor.add_node("server", Some(Point::new(100.0, 100.0)));
/// let database = editor.add_node("database", Some(Point::new(300.0, 100.0)));
/// editor.connect(&server, &database).expect("both nodes exist");
///
/// let svg = editor.export_svg();
/// assert!(svg.contains("<svg"));
///
/// editor.undo();
/// assert_eq!(editor.canvas().graph().connection_count(), 0);
/// editor.redo();
/// assert_eq!(editor.canvas().graph().connection_count(), 1);
/// ```
///
/// Pointer-driven editing goes through [`press`](Self::press),
/// [`motion`](Self::motion), and [`release`](Self::release) with
/// canvas-space coordinates; see [`interaction::to_canvas`] for the
/// client-space conversion.
#[derive(Debug, Default)]
pub struct DiagramEditor {
    title: String,
    config: EditorConfig,
    canvas: CanvasModel,
    controller: InteractionController,
    history: History,
}

impl DiagramEditor {
    /// Creates an empty editor with the given configuration.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            title: String::new(),
            canvas: CanvasModel::new(&config),
            config,
            controller: InteractionController::new(),
            history: History::new(),
        }
    }

    /// Returns the diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the diagram title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the canvas model, for reading graph and session state.
    pub fn canvas(&self) -> &CanvasModel {
        &self.canvas
    }

    // --- Committed mutations -------------------------------------------

    /// Places a new node from the catalog and commits a snapshot. Returns
    /// the new node's id.
    ///
    /// When `position` is omitted the node lands at a pseudo-random spot in
    /// the configured placement zone, grid-snapped if snapping is on.
    pub fn add_node(&mut self, shape_id: &str, position: Option<Point>) -> String {
        let id = self.canvas.add_node(shape_id, position).id.clone();
        self.history.record(self.canvas.graph());
        id
    }

    /// Deletes the selected node or connection and commits a snapshot.
    /// Returns false (committing nothing) when nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        let deleted = self.canvas.delete_selected();
        if deleted {
            self.history.record(self.canvas.graph());
        }
        deleted
    }

    /// Connects two nodes and commits a snapshot. Returns the connection id,
    /// or `None` (committing nothing) for a self-loop or unknown endpoint.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        let id = self.canvas.connect(source, target)?.id.clone();
        self.history.record(self.canvas.graph());
        Some(id)
    }

    // --- Session-only operations ---------------------------------------

    /// Applies a property edit to a node. Property edits do not commit
    /// history snapshots; only structural mutations do.
    pub fn update_node_property(&mut self, id: &str, property: NodeProperty) {
        self.canvas.update_node_property(id, property);
    }

    /// Selects a node by id.
    pub fn select_node(&mut self, id: &str) {
        self.canvas.select_node(id);
    }

    /// Selects a connection by id.
    pub fn select_connection(&mut self, id: &str) {
        self.canvas.select_connection(id);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.canvas.clear_selection();
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        self.canvas.selection()
    }

    /// Returns the active tool.
    pub fn tool(&self) -> ToolMode {
        self.canvas.tool()
    }

    /// Switches the active tool.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.canvas.set_tool(tool);
    }

    /// Returns the zoom level in percent.
    pub fn zoom(&self) -> u16 {
        self.canvas.zoom()
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: u16) {
        self.canvas.set_zoom(zoom);
    }

    /// Steps the zoom level up.
    pub fn zoom_in(&mut self) {
        self.canvas.zoom_in();
    }

    /// Steps the zoom level down.
    pub fn zoom_out(&mut self) {
        self.canvas.zoom_out();
    }

    /// Toggles grid snapping for subsequent placements and moves.
    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.canvas.set_snap_to_grid(snap);
    }

    /// Toggles grid visibility.
    pub fn set_show_grid(&mut self, show: bool) {
        self.canvas.set_show_grid(show);
    }

    // --- Pointer gestures ----------------------------------------------

    /// Handles a pointer press at a canvas-space point.
    pub fn press(&mut self, point: Point) {
        self.controller.press(&mut self.canvas, point);
    }

    /// Handles pointer motion at a canvas-space point.
    pub fn motion(&mut self, point: Point) {
        self.controller.motion(&mut self.canvas, point);
    }

    /// Handles a pointer release, completing the gesture. Drags and
    /// connections that changed the document commit one snapshot here.
    pub fn release(&mut self, point: Point) {
        self.controller
            .release(&mut self.canvas, &mut self.history, point);
    }

    // --- History -------------------------------------------------------

    /// Steps back one committed state. Returns false at the oldest state.
    pub fn undo(&mut self) -> bool {
        let Some(graph) = self.history.undo().cloned() else {
            return false;
        };
        debug!("Undo");
        self.canvas.restore(graph);
        true
    }

    /// Steps forward one committed state. Returns false at the newest state.
    pub fn redo(&mut self) -> bool {
        let Some(graph) = self.history.redo().cloned() else {
            return false;
        };
        debug!("Redo");
        self.canvas.restore(graph);
        true
    }

    /// Returns true when [`undo`](Self::undo) would change state.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true when [`redo`](Self::redo) would change state.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Export and persistence ----------------------------------------

    /// Renders the diagram to a standalone SVG string.
    pub fn export_svg(&self) -> String {
        self.svg_exporter()
            .render_graph(self.canvas.graph())
            .to_string()
    }

    /// Renders the diagram to single-page PDF bytes with the title as the
    /// page header.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Export`] when the intermediate image cannot be
    /// rasterized. The editing session is unaffected by export failures.
    pub fn export_pdf(&self) -> Result<Vec<u8>, VellumError> {
        let bytes = PdfExporter::new()
            .with_svg_exporter(self.svg_exporter())
            .render_graph(self.canvas.graph(), &self.title)?;
        Ok(bytes)
    }

    /// Derives a download-safe file name from the title, e.g.
    /// `"Platform Architecture"` becomes `"Platform_Architecture.svg"`.
    pub fn file_name(&self, extension: &str) -> String {
        export::sanitize_file_name(&self.title, extension)
    }

    /// Returns the serializable document: title plus graph, session state
    /// stripped.
    pub fn to_document(&self) -> DiagramDocument {
        self.canvas.to_document(&self.title)
    }

    /// Serializes the document and stores it through the given store.
    /// Returns the stored diagram's id.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Serialize`] when encoding fails or whatever
    /// error the store reports.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vellum::{DiagramEditor, persistence::MemoryStore};
    ///
    /// let mut editor = DiagramEditor::default();
    /// editor.set_title("Platform Architecture");
    /// editor.add_node("server", None);
    ///
    /// let mut store = MemoryStore::new();
    /// let id = editor.save_to(&mut store, "project-1").expect("save");
    /// assert_eq!(store.list("project-1").unwrap()[0].id, id);
    /// ```
    pub fn save_to(
        &self,
        store: &mut dyn DiagramStore,
        project_id: &str,
    ) -> Result<String, VellumError> {
        let blob = self.to_document().to_json()?;
        let id = store.save(project_id, &self.title, &blob)?;
        info!(diagram_id = id.as_str(), project_id = project_id; "Saved diagram");
        Ok(id)
    }

    /// Replaces the editor content with a previously serialized document.
    ///
    /// The loaded state becomes the new history baseline; undo does not
    /// reach back across a load.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Serialize`] when the blob does not parse.
    pub fn load_json(&mut self, json: &str) -> Result<(), VellumError> {
        let document = DiagramDocument::from_json(json)?;
        info!(title = document.title.as_str(); "Loaded diagram");

        self.title = document.title.clone();
        self.canvas.load_document(document);
        self.controller = InteractionController::new();
        self.history = History::new();
        self.history.record(self.canvas.graph());
        Ok(())
    }

    /// Builds the SVG exporter, applying the configured background color. An
    /// unparseable configured color falls back to the renderer default.
    fn svg_exporter(&self) -> SvgExporter {
        match self.config.style().background_color() {
            Ok(Some(background)) => SvgExporter::new().with_background(background),
            Ok(None) => SvgExporter::new(),
            Err(err) => {
                warn!(err = err.as_str(); "Ignoring invalid background color");
                SvgExporter::new()
            }
        }
    }
}
