//! The persistence adapter contract.
//!
//! Storage is an external collaborator: the engine hands over a serialized
//! diagram blob keyed by project id and gets summaries back. The blob is
//! opaque to the store; the only requirement is that it round-trips
//! losslessly. [`MemoryStore`] is the in-memory reference implementation
//! backing the example and the test suites.

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use serde::{Deserialize, Serialize};

use crate::VellumError;

/// A stored diagram's listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub id: String,
    pub title: String,
    /// Creation timestamp, in whatever format the backing store produces.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Contract implemented by diagram storage backends.
///
/// The engine serializes the diagram document to a JSON blob before calling
/// [`save`](Self::save) and never inspects stored blobs itself.
pub trait DiagramStore {
    /// Stores a serialized diagram under the given project and returns the
    /// stored diagram's id.
    fn save(&mut self, project_id: &str, title: &str, graph: &str) -> Result<String, VellumError>;

    /// Lists the diagrams stored for a project, newest last.
    fn list(&self, project_id: &str) -> Result<Vec<DiagramSummary>, VellumError>;
}

#[derive(Debug, Clone)]
struct StoredDiagram {
    id: String,
    project_id: String,
    title: String,
    graph: String,
    created_at: String,
}

/// In-memory [`DiagramStore`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<StoredDiagram>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored blob for a diagram id, for callers that want to
    /// reload a previously saved document.
    pub fn graph(&self, diagram_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == diagram_id)
            .map(|entry| entry.graph.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagramStore for MemoryStore {
    fn save(&mut self, project_id: &str, title: &str, graph: &str) -> Result<String, VellumError> {
        self.next_id += 1;
        let id = format!("diagram-{}", self.next_id);

        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs().to_string())
            .unwrap_or_default();

        info!(diagram_id = id.as_str(), project_id = project_id; "Stored diagram");
        self.entries.push(StoredDiagram {
            id: id.clone(),
            project_id: project_id.to_string(),
            title: title.to_string(),
            graph: graph.to_string(),
            created_at,
        });

        Ok(id)
    }

    fn list(&self, project_id: &str) -> Result<Vec<DiagramSummary>, VellumError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.project_id == project_id)
            .map(|entry| DiagramSummary {
                id: entry.id.clone(),
                title: entry.title.clone(),
                created_at: entry.created_at.clone(),
            })
            .collect())
    }
}
