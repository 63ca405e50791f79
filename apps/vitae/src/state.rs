//! Application state and the submit/export pipeline.
//!
//! `AppState` bundles the injectable collaborators: the resume store, the
//! document exporter, and the single in-flight export guard. Control flow is
//! strictly `validate → store write → render → export`; the store is only
//! ever written with a fully validated record.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::error;

use crate::render::document::render;
use crate::render::exporter::{export_filename, DocumentExporter, ExportError, ExportGuard};
use crate::schema::record::RawResume;
use crate::schema::validate::{validate, FieldErrors};
use crate::store::ResumeStore;

/// Shared application state, cloned into whoever drives the pipeline.
#[derive(Clone)]
pub struct AppState {
    pub store: ResumeStore,
    pub exporter: Arc<dyn DocumentExporter>,
    /// Serializes export requests — at most one in flight per session.
    pub export_guard: ExportGuard,
}

impl AppState {
    pub fn new(exporter: Arc<dyn DocumentExporter>) -> Self {
        AppState {
            store: ResumeStore::new(),
            exporter,
            export_guard: ExportGuard::new(),
        }
    }

    /// Submits a raw candidate: validates it and, only on full success,
    /// replaces the stored record wholesale. On failure the store keeps its
    /// last-good record and the complete error mapping is returned.
    pub fn submit(&self, raw: &RawResume) -> Result<(), FieldErrors> {
        let record = validate(raw)?;
        self.store.set_resume(record);
        Ok(())
    }

    /// Renders the store's current record and exports it.
    ///
    /// A missing export target is reported and swallowed (`Ok(None)`) — the
    /// user-visible effect is "nothing happens", with a diagnostic for
    /// debugging. Backend failures propagate; there is no automatic retry.
    /// A concurrent call while an export is in flight fails with
    /// `ExportError::Busy`.
    pub async fn export_current(&self) -> Result<Option<PathBuf>, ExportError> {
        let _permit = self.export_guard.begin()?;

        let record = self.store.resume();
        let tree = render(&record);
        let filename = export_filename(&record.name);

        match self.exporter.export(&tree, &filename).await {
            Ok(path) => Ok(Some(path)),
            Err(ExportError::TargetMissing(path)) => {
                error!(target = %path.display(), "export target missing; nothing written");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
