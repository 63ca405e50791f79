// Rendering pipeline: record → document tree → paginated layout → PDF file.
// The tree's height is unconstrained; pagination flows extra pages as needed.

pub mod document;
pub mod exporter;
pub mod layout;
pub mod metrics;

// Re-export the public API consumed by the pipeline and the binary.
pub use document::{render, DocumentTree, SectionKind};
pub use exporter::{export_filename, DocumentExporter, ExportError, ExportGuard, PdfExporter};
pub use layout::{paginate, PageGeometry, PageLayout};
