//! Vitae — resume record validation, session storage, and fixed-page PDF
//! export.
//!
//! The pipeline is three layers, leaf to root:
//!
//! 1. [`schema`] — declarative field rules and the pure validator:
//!    `validate(&RawResume) -> Result<ResumeRecord, FieldErrors>`.
//! 2. [`store`] — the injectable session store holding the last validated
//!    record (plus the display theme flag).
//! 3. [`render`] — record → ordered [`render::DocumentTree`] → paginated A4
//!    layout → PDF file via [`render::PdfExporter`].
//!
//! [`state::AppState`] wires the layers together and enforces the control
//! flow: only a successful validation may write the store, and rendering
//! always reads a full store snapshot.

pub mod config;
pub mod errors;
pub mod render;
pub mod schema;
pub mod state;
pub mod store;

pub use errors::AppError;
pub use render::{export_filename, paginate, render, DocumentTree, PageGeometry, PdfExporter};
pub use schema::{validate, FieldErrors, RawResume, ResumeRecord, SkillLevel};
pub use state::AppState;
pub use store::ResumeStore;
