//! Linear undo/redo history over graph snapshots.
//!
//! The history is an append-only list of full deep copies of the document
//! graph with a cursor into it. Committing a mutation while the cursor sits
//! behind the newest snapshot discards the unreachable future first, the
//! standard undo-branch behavior. Full copies are fine at the expected scale
//! of tens of nodes; a command-based history would be the next step if that
//! ever changed.

use log::debug;

use crate::canvas::Graph;

/// Undo/redo stack of graph snapshots.
///
/// The cursor is `None` before the first commit, meaning there is nothing to
/// undo to. Session state is never captured; undo and redo move only the
/// document graph.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Graph>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a snapshot of the graph.
    ///
    /// Any snapshots ahead of the cursor (the redo tail left behind by
    /// undos) are discarded before the new snapshot is appended.
    pub fn record(&mut self, graph: &Graph) {
        let keep = match self.cursor {
            Some(index) => index + 1,
            None => 0,
        };
        self.snapshots.truncate(keep);
        self.snapshots.push(graph.clone());
        self.cursor = Some(self.snapshots.len() - 1);
        debug!(snapshots = self.snapshots.len(); "Committed history snapshot");
    }

    /// Steps back one snapshot and returns it, or `None` when already at the
    /// oldest reachable state.
    pub fn undo(&mut self) -> Option<&Graph> {
        let index = self.cursor?;
        if index == 0 {
            return None;
        }
        self.cursor = Some(index - 1);
        self.snapshots.get(index - 1)
    }

    /// Steps forward one snapshot and returns it, or `None` when already at
    /// the newest.
    pub fn redo(&mut self) -> Option<&Graph> {
        let index = self.cursor?;
        if index + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(index + 1);
        self.snapshots.get(index + 1)
    }

    /// Returns true when [`undo`](Self::undo) would return a snapshot.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    /// Returns true when [`redo`](Self::redo) would return a snapshot.
    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.snapshots.len())
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::geometry::Point;

    use super::*;
    use crate::canvas::CanvasModel;

    /// Builds a canvas with `count` nodes, committing after each addition,
    /// the way the editor does.
    fn canvas_with_history(count: usize) -> (CanvasModel, History) {
        let mut canvas = CanvasModel::default();
        let mut history = History::new();
        for i in 0..count {
            canvas.add_node("server", Some(Point::new(i as f32 * 40.0, 0.0)));
            history.record(canvas.graph());
        }
        (canvas, history)
    }

    #[test]
    fn test_empty_history_has_nothing_to_do() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_single_snapshot_cannot_undo() {
        let (_, mut history) = canvas_with_history(1);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_twice_then_redo_once() {
        // Three additions, undo twice: one node remains. Redo once: two.
        let (mut canvas, mut history) = canvas_with_history(3);

        let graph = history.undo().expect("first undo").clone();
        canvas.restore(graph);
        let graph = history.undo().expect("second undo").clone();
        canvas.restore(graph);
        assert_eq!(canvas.graph().node_count(), 1);

        let graph = history.redo().expect("redo").clone();
        canvas.restore(graph);
        assert_eq!(canvas.graph().node_count(), 2);
    }

    #[test]
    fn test_undo_redo_round_trip_restores_final_state() {
        let (canvas, mut history) = canvas_with_history(5);
        let final_state = canvas.graph().clone();

        let mut undone = 0;
        while history.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, 4);

        let mut last = None;
        while let Some(graph) = history.redo() {
            last = Some(graph.clone());
        }
        assert_eq!(last.expect("redo should produce states"), final_state);
    }

    #[test]
    fn test_commit_after_undo_discards_future() {
        let (mut canvas, mut history) = canvas_with_history(3);

        let graph = history.undo().expect("undo").clone();
        canvas.restore(graph);

        canvas.add_node("cloud", Some(Point::new(500.0, 0.0)));
        history.record(canvas.graph());

        assert!(history.redo().is_none());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_undo_then_redo_is_observed_by_can_flags() {
        let (_, mut history) = canvas_with_history(2);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo();
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_snapshots_are_independent_copies() {
        let (mut canvas, mut history) = canvas_with_history(1);
        let id = canvas.graph().nodes().next().unwrap().id.clone();

        // Mutating the canvas must not bleed into the stored snapshot
        canvas.move_node(&id, Point::new(900.0, 900.0));
        canvas.add_node("cloud", Some(Point::new(0.0, 500.0)));
        history.record(canvas.graph());

        let first = history.undo().expect("undo").clone();
        assert_eq!(first.node_count(), 1);
        assert_eq!(first.node(&id).unwrap().x, 0.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use vellum_core::geometry::Point;

    use super::*;
    use crate::canvas::CanvasModel;

    /// A committed editing operation, with node references as indices into
    /// whatever nodes exist when the operation is applied.
    #[derive(Debug, Clone)]
    enum EditOp {
        Add,
        Move(u8, i16, i16),
        Connect(u8, u8),
        Delete(u8),
    }

    fn op_strategy() -> impl Strategy<Value = EditOp> {
        prop_oneof![
            Just(EditOp::Add),
            (0u8..8, -500i16..500, -500i16..500).prop_map(|(n, x, y)| EditOp::Move(n, x, y)),
            (0u8..8, 0u8..8).prop_map(|(a, b)| EditOp::Connect(a, b)),
            (0u8..8).prop_map(EditOp::Delete),
        ]
    }

    fn nth_id(canvas: &CanvasModel, n: u8) -> Option<String> {
        let count = canvas.graph().node_count();
        if count == 0 {
            return None;
        }
        canvas
            .graph()
            .nodes()
            .nth(n as usize % count)
            .map(|node| node.id.clone())
    }

    /// Applies an operation the way the editor would, recording a snapshot
    /// only when the document actually changed.
    fn apply(canvas: &mut CanvasModel, history: &mut History, op: &EditOp) {
        match op {
            EditOp::Add => {
                canvas.add_node("server", Some(Point::new(0.0, 0.0)));
                history.record(canvas.graph());
            }
            EditOp::Move(n, x, y) => {
                if let Some(id) = nth_id(canvas, *n) {
                    canvas.move_node(&id, Point::new(f32::from(*x), f32::from(*y)));
                    history.record(canvas.graph());
                }
            }
            EditOp::Connect(a, b) => {
                let endpoints = nth_id(canvas, *a).zip(nth_id(canvas, *b));
                if let Some((source, target)) = endpoints {
                    if canvas.connect(&source, &target).is_some() {
                        history.record(canvas.graph());
                    }
                }
            }
            EditOp::Delete(n) => {
                if let Some(id) = nth_id(canvas, *n) {
                    canvas.select_node(&id);
                    if canvas.delete_selected() {
                        history.record(canvas.graph());
                    }
                }
            }
        }
    }

    /// Undoing everything and redoing everything lands back on the exact
    /// final state.
    fn check_round_trip(ops: Vec<EditOp>) -> Result<(), TestCaseError> {
        let mut canvas = CanvasModel::default();
        let mut history = History::new();
        for op in &ops {
            apply(&mut canvas, &mut history, op);
        }
        let final_state = canvas.graph().clone();

        let mut undone = 0;
        while let Some(graph) = history.undo() {
            let graph = graph.clone();
            canvas.restore(graph);
            undone += 1;
        }
        for _ in 0..undone {
            let graph = history.redo().expect("every undo has a redo").clone();
            canvas.restore(graph);
        }

        prop_assert_eq!(canvas.graph(), &final_state);
        prop_assert!(!history.can_redo());
        Ok(())
    }

    proptest! {
        #[test]
        fn undo_redo_round_trip(ops in proptest::collection::vec(op_strategy(), 1..25)) {
            check_round_trip(ops)?;
        }
    }
}
