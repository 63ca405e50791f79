//! PDF export — serializes a paginated layout into a fixed-page document file.
//!
//! The backend is `printpdf` with the builtin Helvetica faces, so the output
//! reproduces the fixed A4 geometry regardless of anything about the caller's
//! environment. Writing is CPU/IO-bound and runs under
//! `tokio::task::spawn_blocking`; `export` is the pipeline's only suspension
//! point.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::render::document::{DocumentTree, Rgb8};
use crate::render::layout::{paginate, FontStyle, PageGeometry, PageLayout};

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    /// The designated export target directory is absent at call time.
    /// Recoverable — the caller reports it and the document is untouched.
    #[error("export target directory does not exist: {0}")]
    TargetMissing(PathBuf),

    /// A second export was requested while one is still in flight.
    #[error("an export is already in flight")]
    Busy,

    #[error("io error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf backend error: {0}")]
    Backend(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Filename derivation
// ────────────────────────────────────────────────────────────────────────────

/// Derives the export filename from the subject's display name: whitespace
/// runs become `-`, then the fixed `_resume.pdf` suffix.
pub fn export_filename(name: &str) -> String {
    let stem: String = name.split_whitespace().collect::<Vec<_>>().join("-");
    if stem.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{stem}_resume.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter trait + printpdf implementation
// ────────────────────────────────────────────────────────────────────────────

/// Capability seam for "render a document tree to a paginated file".
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Writes the document and returns the path of the produced file.
    async fn export(&self, tree: &DocumentTree, filename: &str) -> Result<PathBuf, ExportError>;
}

/// printpdf-backed exporter writing A4 documents into a fixed directory.
pub struct PdfExporter {
    output_dir: PathBuf,
    geometry: PageGeometry,
}

impl PdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>, geometry: PageGeometry) -> Self {
        PdfExporter {
            output_dir: output_dir.into(),
            geometry,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl DocumentExporter for PdfExporter {
    async fn export(&self, tree: &DocumentTree, filename: &str) -> Result<PathBuf, ExportError> {
        if !self.output_dir.is_dir() {
            return Err(ExportError::TargetMissing(self.output_dir.clone()));
        }

        let path = self.output_dir.join(filename);
        let tree = tree.clone();
        let geometry = self.geometry.clone();
        let out_path = path.clone();

        // Pagination and PDF serialization are CPU-bound; keep them off the
        // async executor.
        tokio::task::spawn_blocking(move || {
            let pages = paginate(&tree, &geometry);
            debug!(pages = pages.len(), path = %out_path.display(), "writing pdf");
            write_pdf(&pages, &geometry, &tree.header.name, &out_path)
        })
        .await
        .map_err(|e| ExportError::Backend(format!("export task failed: {e}")))??;

        info!(path = %path.display(), "resume exported");
        Ok(path)
    }
}

fn pdf_color(color: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &PageLayout,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for run in &page.runs {
        let font = match run.style {
            FontStyle::Regular => regular,
            FontStyle::Bold => bold,
        };
        layer.set_fill_color(pdf_color(run.color));
        layer.use_text(
            run.text.clone(),
            run.size_pt,
            Mm(run.x_mm),
            Mm(run.y_mm),
            font,
        );
    }

    for rule in &page.rules {
        layer.set_outline_color(pdf_color(rule.color));
        layer.set_outline_thickness(rule.thickness_pt);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(rule.x1_mm), Mm(rule.y_mm)), false),
                (Point::new(Mm(rule.x2_mm), Mm(rule.y_mm)), false),
            ],
            is_closed: false,
        });
    }
}

fn write_pdf(
    pages: &[PageLayout],
    geometry: &PageGeometry,
    title: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let doc_title = if title.is_empty() { "Resume" } else { title };
    let (doc, first_page, first_layer) = PdfDocument::new(
        doc_title,
        Mm(geometry.width_mm),
        Mm(geometry.height_mm),
        "Page 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Backend(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Backend(e.to_string()))?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(geometry.width_mm),
                Mm(geometry.height_mm),
                format!("Page {}", i + 1),
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Backend(e.to_string()))?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// In-flight guard
// ────────────────────────────────────────────────────────────────────────────

/// Serializes export requests: at most one export is in flight per document.
/// A second request while the permit is held is rejected with
/// `ExportError::Busy` instead of racing the first.
#[derive(Debug, Clone, Default)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl ExportGuard {
    pub fn new() -> Self {
        ExportGuard::default()
    }

    /// Acquires the single export slot. The returned permit releases it on drop.
    pub fn begin(&self) -> Result<ExportPermit, ExportError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(ExportPermit {
                busy: Arc::clone(&self.busy),
            })
        } else {
            Err(ExportError::Busy)
        }
    }
}

/// RAII permit for one in-flight export.
#[derive(Debug)]
pub struct ExportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::render;
    use crate::schema::record::{Education, ResumeRecord};

    fn make_tree() -> DocumentTree {
        let mut record = ResumeRecord::scaffold();
        record.name = "Jane Smith".to_string();
        record.email = "jane@example.com".to_string();
        record.summary = "Storage systems engineer.".to_string();
        record.experience.clear();
        record.education = vec![Education {
            degree: "BSc Computer Science".to_string(),
            college: "State University".to_string(),
            duration: "2011 - 2015".to_string(),
        }];
        record.projects.clear();
        record.certifications.clear();
        record.skills.clear();
        record.keywords.clear();
        render(&record)
    }

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(export_filename("Jane Smith"), "Jane-Smith_resume.pdf");
        assert_eq!(export_filename("Jane  van  Smith"), "Jane-van-Smith_resume.pdf");
        assert_eq!(export_filename("Prince"), "Prince_resume.pdf");
    }

    #[test]
    fn test_filename_for_blank_name_still_valid() {
        assert_eq!(export_filename(""), "resume.pdf");
        assert_eq!(export_filename("   "), "resume.pdf");
    }

    #[tokio::test]
    async fn test_export_writes_pdf_into_target_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exporter = PdfExporter::new(dir.path(), PageGeometry::a4());
        let tree = make_tree();

        let path = exporter
            .export(&tree, &export_filename(&tree.header.name))
            .await
            .expect("export succeeds into an existing directory");

        assert_eq!(path, dir.path().join("Jane-Smith_resume.pdf"));
        let bytes = std::fs::read(&path).expect("file exists");
        assert!(bytes.starts_with(b"%PDF"), "output is a pdf container");
        assert!(bytes.len() > 512, "non-trivial document body");
    }

    #[tokio::test]
    async fn test_export_missing_target_is_recoverable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("never-created");
        let exporter = PdfExporter::new(&gone, PageGeometry::a4());

        let err = exporter
            .export(&make_tree(), "out.pdf")
            .await
            .expect_err("absent target directory must fail");
        assert!(matches!(err, ExportError::TargetMissing(p) if p == gone));
    }

    #[test]
    fn test_guard_rejects_second_in_flight_export() {
        let guard = ExportGuard::new();
        let permit = guard.begin().expect("first acquisition");
        let second = guard.begin();
        assert!(matches!(second, Err(ExportError::Busy)));

        drop(permit);
        assert!(guard.begin().is_ok(), "slot frees when the permit drops");
    }

    #[test]
    fn test_guard_clones_share_the_slot() {
        let guard = ExportGuard::new();
        let clone = guard.clone();
        let _permit = guard.begin().expect("first acquisition");
        assert!(matches!(clone.begin(), Err(ExportError::Busy)));
    }
}
