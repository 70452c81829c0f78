//! Pointer gesture handling.
//!
//! Gestures are a small state machine instead of a pile of boolean flags, so
//! illegal combinations (dragging while also mid-connect) cannot be
//! represented. The controller translates press/motion/release sequences
//! into canvas mutations and commits exactly one history snapshot per
//! gesture that actually changed the document.

use log::debug;

use vellum_core::geometry::Point;

use crate::{
    canvas::{CanvasModel, ToolMode},
    history::History,
};

/// Converts a client-space pointer position into canvas space.
///
/// `viewport_origin` is the client-space position of the canvas's top-left
/// corner; `zoom_percent` is the view scale applied on top of canvas space.
/// This is the single place where client coordinates are translated, so the
/// math stays testable without a rendering surface.
pub fn to_canvas(client: Point, viewport_origin: Point, zoom_percent: u16) -> Point {
    let scale = f32::from(zoom_percent.max(1)) / 100.0;
    Point::new(
        (client.x() - viewport_origin.x()) / scale,
        (client.y() - viewport_origin.y()) / scale,
    )
}

/// The phase of the current pointer gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// A node is being dragged. `grab_offset` is the vector from the node's
    /// top-left corner to the initial press point, so the node does not jump
    /// under the pointer. `moved` records whether any motion actually
    /// changed the node's position.
    Dragging {
        node_id: String,
        grab_offset: Point,
        moved: bool,
    },
    /// A connection is being drawn out of `source_id`.
    Connecting { source_id: String },
}

/// Translates pointer events into canvas mutations and history commits.
#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current gesture phase.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Handles a pointer press at a canvas-space point.
    ///
    /// In select mode a press on a node selects it and starts a drag; in
    /// connect mode it starts an outgoing connection. A press on empty
    /// canvas clears the selection in either mode.
    pub fn press(&mut self, canvas: &mut CanvasModel, point: Point) {
        let hit = canvas.graph().hit_test(point).map(|node| {
            let id = node.id.clone();
            let grab_offset = point.sub_point(node.origin());
            (id, grab_offset)
        });

        match (canvas.tool(), hit) {
            (ToolMode::Select, Some((node_id, grab_offset))) => {
                canvas.select_node(&node_id);
                self.gesture = Gesture::Dragging {
                    node_id,
                    grab_offset,
                    moved: false,
                };
            }
            (ToolMode::Connect, Some((node_id, _))) => {
                debug!(source = node_id.as_str(); "Started connection");
                self.gesture = Gesture::Connecting { source_id: node_id };
            }
            (_, None) => {
                canvas.clear_selection();
                self.gesture = Gesture::Idle;
            }
        }
    }

    /// Handles pointer motion. Only meaningful mid-drag, where it moves the
    /// dragged node to the offset-corrected, snapped position. Cheap enough
    /// to call on every pointer event.
    pub fn motion(&mut self, canvas: &mut CanvasModel, point: Point) {
        if let Gesture::Dragging {
            node_id,
            grab_offset,
            moved,
        } = &mut self.gesture
        {
            let before = canvas.graph().node(node_id).map(|node| node.origin());
            canvas.move_node(node_id, point.sub_point(*grab_offset));
            let after = canvas.graph().node(node_id).map(|node| node.origin());
            if before != after {
                *moved = true;
            }
        }
    }

    /// Handles a pointer release, completing the gesture.
    ///
    /// Completed drags and successful connections commit one history
    /// snapshot each. Releasing a connection over empty canvas or back over
    /// its own source abandons it without mutating anything.
    pub fn release(&mut self, canvas: &mut CanvasModel, history: &mut History, point: Point) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Dragging { node_id, moved, .. } => {
                if moved {
                    debug!(node_id = node_id.as_str(); "Completed drag");
                    history.record(canvas.graph());
                }
            }
            Gesture::Connecting { source_id } => {
                let target = canvas
                    .graph()
                    .hit_test_excluding(point, &source_id)
                    .map(|node| node.id.clone());

                match target {
                    Some(target_id) => {
                        if canvas.connect(&source_id, &target_id).is_some() {
                            history.record(canvas.graph());
                        }
                    }
                    None => {
                        debug!(source = source_id.as_str(); "Abandoned connection");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CanvasModel, History, InteractionController) {
        (
            CanvasModel::default(),
            History::new(),
            InteractionController::new(),
        )
    }

    #[test]
    fn test_to_canvas_translates_and_scales() {
        let point = to_canvas(Point::new(350.0, 250.0), Point::new(50.0, 50.0), 100);
        assert_eq!(point, Point::new(300.0, 200.0));

        let zoomed = to_canvas(Point::new(350.0, 250.0), Point::new(50.0, 50.0), 200);
        assert_eq!(zoomed, Point::new(150.0, 100.0));

        let shrunk = to_canvas(Point::new(100.0, 100.0), Point::new(0.0, 0.0), 50);
        assert_eq!(shrunk, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_to_canvas_at_fractional_zoom() {
        let point = to_canvas(Point::new(320.0, 200.0), Point::new(20.0, 20.0), 150);
        assert!(float_cmp::approx_eq!(f32, point.x(), 200.0));
        assert!(float_cmp::approx_eq!(f32, point.y(), 120.0));
    }

    #[test]
    fn test_drag_moves_node_and_commits_once() {
        let (mut canvas, mut history, mut controller) = setup();
        let id = canvas
            .add_node("server", Some(Point::new(100.0, 100.0)))
            .id
            .clone();
        history.record(canvas.graph());

        // Grab the node 10 units inside its corner
        controller.press(&mut canvas, Point::new(110.0, 110.0));
        assert!(matches!(controller.gesture(), Gesture::Dragging { .. }));
        assert_eq!(canvas.selection().node_id(), Some(id.as_str()));

        controller.motion(&mut canvas, Point::new(210.0, 110.0));
        controller.motion(&mut canvas, Point::new(310.0, 150.0));
        controller.release(&mut canvas, &mut history, Point::new(310.0, 150.0));

        let node = canvas.graph().node(&id).unwrap();
        // 310 - grab offset 10 = 300, 150 - 10 = 140; both on-grid already
        assert_eq!((node.x, node.y), (300.0, 140.0));

        // One snapshot for the add, one for the whole drag
        assert_eq!(history.len(), 2);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_click_without_movement_commits_nothing() {
        let (mut canvas, mut history, mut controller) = setup();
        canvas.add_node("server", Some(Point::new(100.0, 100.0)));
        history.record(canvas.graph());

        controller.press(&mut canvas, Point::new(110.0, 110.0));
        controller.release(&mut canvas, &mut history, Point::new(110.0, 110.0));

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let (mut canvas, mut history, mut controller) = setup();
        let id = canvas
            .add_node("server", Some(Point::new(100.0, 100.0)))
            .id
            .clone();
        canvas.select_node(&id);

        controller.press(&mut canvas, Point::new(700.0, 700.0));
        controller.release(&mut canvas, &mut history, Point::new(700.0, 700.0));

        assert!(canvas.selection().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_connect_gesture_creates_connection() {
        let (mut canvas, mut history, mut controller) = setup();
        let a = canvas
            .add_node("server", Some(Point::new(0.0, 0.0)))
            .id
            .clone();
        let b = canvas
            .add_node("database", Some(Point::new(200.0, 0.0)))
            .id
            .clone();
        canvas.set_tool(ToolMode::Connect);

        controller.press(&mut canvas, Point::new(10.0, 10.0));
        assert!(matches!(controller.gesture(), Gesture::Connecting { .. }));

        controller.release(&mut canvas, &mut history, Point::new(210.0, 10.0));

        assert_eq!(canvas.graph().connection_count(), 1);
        let connection = canvas.graph().connections().next().unwrap();
        assert_eq!(connection.source, a);
        assert_eq!(connection.target, b);
        assert_eq!(history.len(), 1);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_connect_released_on_source_is_abandoned() {
        let (mut canvas, mut history, mut controller) = setup();
        canvas.add_node("server", Some(Point::new(0.0, 0.0)));
        canvas.set_tool(ToolMode::Connect);

        controller.press(&mut canvas, Point::new(10.0, 10.0));
        // Release still over the source node itself
        controller.release(&mut canvas, &mut history, Point::new(20.0, 20.0));

        assert_eq!(canvas.graph().connection_count(), 0);
        assert!(history.is_empty());
        assert!(controller.is_idle());
    }

    #[test]
    fn test_connect_released_on_empty_canvas_is_abandoned() {
        let (mut canvas, mut history, mut controller) = setup();
        canvas.add_node("server", Some(Point::new(0.0, 0.0)));
        canvas.set_tool(ToolMode::Connect);

        controller.press(&mut canvas, Point::new(10.0, 10.0));
        controller.release(&mut canvas, &mut history, Point::new(600.0, 600.0));

        assert_eq!(canvas.graph().connection_count(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_release_while_idle_is_noop() {
        let (mut canvas, mut history, mut controller) = setup();
        canvas.add_node("server", Some(Point::new(0.0, 0.0)));

        controller.release(&mut canvas, &mut history, Point::new(10.0, 10.0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_drag_keeps_pointer_grab_offset() {
        let (mut canvas, mut history, mut controller) = setup();
        canvas.set_snap_to_grid(false);
        let id = canvas
            .add_node("server", Some(Point::new(100.0, 100.0)))
            .id
            .clone();

        controller.press(&mut canvas, Point::new(130.0, 120.0));
        controller.motion(&mut canvas, Point::new(131.0, 121.0));
        let node = canvas.graph().node(&id).unwrap();
        // The node follows by exactly the pointer delta
        assert_eq!((node.x, node.y), (101.0, 101.0));
        controller.release(&mut canvas, &mut history, Point::new(131.0, 121.0));
        assert_eq!(history.len(), 1);
    }
}
