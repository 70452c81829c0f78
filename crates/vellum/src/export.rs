//! Export encoders: SVG vector output and single-page PDF output.
//!
//! Both encoders are read-only over the canvas model. Failures surface as
//! [`Error`] values for the embedder to report; they never corrupt the
//! editing session.

pub mod pdf;
pub mod svg;

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Derives a download-safe file name from a diagram title: runs of
/// whitespace become single underscores and the extension is appended.
pub fn sanitize_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { "diagram" } else { &stem };
    format!("{stem}.{extension}")
}
