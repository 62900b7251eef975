//! Invoice generation
//!
//! Mirrors the layered print pipeline: a data type describing the document,
//! a renderer seam producing bytes, and a store that persists the artifact
//! and hands back its retrieval URL. Settlement and order logic only ever
//! talk to [`InvoiceService`], so they are testable without a PDF engine.

pub mod renderer;
pub mod storage;
pub mod types;

pub use renderer::{InvoiceRenderer, PdfRenderer};
pub use storage::InvoiceStore;
pub use types::{format_currency, InvoiceDocument, InvoiceLine};

use std::sync::Arc;

use crate::utils::AppResult;

/// Renders an invoice and stores the artifact, returning its URL
#[derive(Clone)]
pub struct InvoiceService {
    renderer: Arc<dyn InvoiceRenderer>,
    store: InvoiceStore,
}

impl InvoiceService {
    pub fn new(renderer: Arc<dyn InvoiceRenderer>, store: InvoiceStore) -> Self {
        Self { renderer, store }
    }

    /// Convenience constructor with the production PDF renderer
    pub fn pdf(store: InvoiceStore) -> Self {
        Self::new(Arc::new(PdfRenderer::default()), store)
    }

    /// Render `doc` and persist it as `invoice-<reference>.pdf`.
    ///
    /// Returns the `/api/uploads/...` URL of the stored artifact.
    pub fn render_and_store(&self, doc: &InvoiceDocument, reference: &str) -> AppResult<String> {
        let bytes = self.renderer.render(doc)?;
        self.store.save(reference, &bytes)
    }

    pub fn store(&self) -> &InvoiceStore {
        &self.store
    }
}
