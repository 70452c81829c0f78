//! Single-page PDF export.
//!
//! The diagram is rendered to SVG first, rasterized onto a pixmap, and the
//! raster is embedded into a page sized to match, with the diagram title
//! drawn as a header. Rasterization failures surface as
//! [`Error::Render`](super::Error::Render); the canvas model is never
//! touched.

use log::{debug, error, info};
use printpdf::{
    BuiltinFont, Color as PdfColor, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point as PdfPoint,
    Pt, RawImage, Rgb, TextItem, XObjectTransform,
};
use tiny_skia::Pixmap;

use crate::{canvas::Graph, export, export::svg::SvgExporter};

/// Pixels per millimeter at the 96 DPI the canvas coordinates assume.
const PX_PER_MM: f32 = 96.0 / 25.4;

/// Title header position, in canvas pixels from the top-left corner.
const TITLE_X: f32 = 20.0;
const TITLE_Y: f32 = 30.0;

const TITLE_FONT_SIZE: f32 = 16.0;

/// Renders the diagram graph into a single-page PDF.
pub struct PdfExporter {
    svg: SvgExporter,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self {
            svg: SvgExporter::new(),
        }
    }

    /// Uses the given SVG exporter for the intermediate vector stage, so
    /// background overrides carry through to the PDF.
    pub fn with_svg_exporter(mut self, svg: SvgExporter) -> Self {
        self.svg = svg;
        self
    }

    /// Renders the graph into PDF bytes, with `title` as the page header.
    ///
    /// An empty graph produces a minimal page rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when the intermediate SVG cannot be
    /// parsed or rasterized.
    pub fn render_graph(&self, graph: &Graph, title: &str) -> Result<Vec<u8>, export::Error> {
        let markup = self.svg.render_graph(graph).to_string();
        let pixmap = rasterize(&markup)?;

        let png = pixmap
            .encode_png()
            .map_err(|err| export::Error::Render(format!("failed to encode raster page: {err}")))?;

        let width_mm = pixmap.width() as f32 / PX_PER_MM;
        let height_mm = pixmap.height() as f32 / PX_PER_MM;

        let mut warnings = Vec::new();
        let mut document = PdfDocument::new(title);

        let image = RawImage::decode_from_bytes(&png, &mut warnings)
            .map_err(|err| export::Error::Render(format!("failed to embed raster page: {err}")))?;
        let image_id = document.add_image(&image);

        let mut ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                dpi: Some(96.0),
                ..Default::default()
            },
        }];
        ops.extend(title_ops(title, height_mm));

        let page = PdfPage::new(Mm(width_mm), Mm(height_mm), ops);
        let bytes = document
            .with_pages(vec![page])
            .save(&PdfSaveOptions::default(), &mut warnings);

        debug!(width_mm = width_mm, height_mm = height_mm; "Rendered PDF document");
        Ok(bytes)
    }

    /// Writes rendered PDF bytes to the specified file.
    pub fn write_document(&self, bytes: &[u8], file_name: &str) -> Result<(), export::Error> {
        info!(file_name = file_name; "Creating PDF file");
        if let Err(err) = std::fs::write(file_name, bytes) {
            error!(file_name = file_name, err:err; "Failed to write PDF file");
            return Err(export::Error::Io(err));
        }
        Ok(())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the SVG markup and rasterizes it at 1:1 scale.
fn rasterize(markup: &str) -> Result<Pixmap, export::Error> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(markup, &options)
        .map_err(|err| export::Error::Render(format!("failed to parse diagram image: {err}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        export::Error::Render(format!(
            "failed to allocate {}x{} raster surface",
            size.width(),
            size.height()
        ))
    })?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Emits the title header on top of the embedded raster. A blank title draws
/// nothing.
fn title_ops(title: &str, page_height_mm: f32) -> Vec<Op> {
    if title.trim().is_empty() {
        return Vec::new();
    }

    // PDF pages have a bottom-left origin; the header offset is measured
    // from the top.
    let cursor = PdfPoint::new(
        Mm(TITLE_X / PX_PER_MM),
        Mm(page_height_mm - TITLE_Y / PX_PER_MM),
    );

    vec![
        Op::StartTextSection,
        Op::SetTextCursor { pos: cursor },
        Op::SetFillColor {
            col: PdfColor::Rgb(Rgb::new(1.0, 1.0, 1.0, None)),
        },
        Op::SetFontSizeBuiltinFont {
            size: Pt(TITLE_FONT_SIZE),
            font: BuiltinFont::Helvetica,
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(title.to_string())],
            font: BuiltinFont::Helvetica,
        },
        Op::EndTextSection,
    ]
}

#[cfg(test)]
mod tests {
    use vellum_core::geometry::Point;

    use super::*;
    use crate::canvas::CanvasModel;

    fn diagram() -> CanvasModel {
        let mut canvas = CanvasModel::default();
        let a = canvas
            .add_node("rectangle", Some(Point::new(100.0, 100.0)))
            .id
            .clone();
        let b = canvas
            .add_node("circle", Some(Point::new(300.0, 100.0)))
            .id
            .clone();
        canvas.connect(&a, &b);
        canvas
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let canvas = diagram();
        let bytes = PdfExporter::new()
            .render_graph(canvas.graph(), "Platform Architecture")
            .expect("render should succeed");

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_graph_produces_minimal_page() {
        let canvas = CanvasModel::default();
        let bytes = PdfExporter::new()
            .render_graph(canvas.graph(), "Empty")
            .expect("empty diagram should still render");

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_with_blank_title_skips_header() {
        let canvas = diagram();
        let bytes = PdfExporter::new()
            .render_graph(canvas.graph(), "   ")
            .expect("render should succeed");

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_document_round_trips_through_disk() {
        let canvas = diagram();
        let exporter = PdfExporter::new();
        let bytes = exporter
            .render_graph(canvas.graph(), "Saved")
            .expect("render should succeed");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("diagram.pdf");
        let path = path.to_string_lossy().to_string();

        exporter
            .write_document(&bytes, &path)
            .expect("write should succeed");

        let written = std::fs::read(&path).expect("read back");
        assert_eq!(written, bytes);
    }

    #[test]
    fn test_write_document_to_bad_path_fails_with_io_error() {
        let exporter = PdfExporter::new();
        let result = exporter.write_document(b"%PDF-", "/nonexistent-dir/x/diagram.pdf");
        assert!(matches!(result, Err(export::Error::Io(_))));
    }
}
