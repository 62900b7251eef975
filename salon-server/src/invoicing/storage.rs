//! Invoice artifact storage
//!
//! Rendered invoices are written under `<work_dir>/uploads` and served back
//! through `/api/uploads/<filename>`. Filenames are derived from the order
//! code or payment id, never from user input.

use std::path::{Path, PathBuf};

use crate::utils::{AppError, AppResult};

const URL_PREFIX: &str = "/api/uploads";

/// File store for rendered invoice artifacts
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    uploads_dir: PathBuf,
}

impl InvoiceStore {
    /// Create a store rooted at `uploads_dir`, creating the directory if
    /// missing
    pub fn new(uploads_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let uploads_dir = uploads_dir.into();
        std::fs::create_dir_all(&uploads_dir)
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;
        Ok(Self { uploads_dir })
    }

    /// Artifact filename for a reference (order code or payment id)
    pub fn file_name(reference: &str) -> String {
        format!("invoice-{}.pdf", reference)
    }

    /// Persist `bytes` and return the artifact's retrieval URL
    pub fn save(&self, reference: &str, bytes: &[u8]) -> AppResult<String> {
        let file_name = Self::file_name(reference);
        let path = self.uploads_dir.join(&file_name);
        std::fs::write(&path, bytes)
            .map_err(|e| AppError::internal(format!("Failed to write invoice: {e}")))?;
        tracing::debug!(file = %file_name, size = bytes.len(), "Invoice stored");
        Ok(format!("{}/{}", URL_PREFIX, file_name))
    }

    /// Resolve a served filename to its path, rejecting traversal attempts
    pub fn resolve(&self, file_name: &str) -> AppResult<PathBuf> {
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(AppError::invalid("Invalid file name"));
        }
        Ok(self.uploads_dir.join(file_name))
    }

    /// Read a stored artifact
    pub fn read(&self, file_name: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(file_name)?;
        if !path.exists() {
            return Err(AppError::not_found(format!(
                "Invoice file {} not found",
                file_name
            )));
        }
        std::fs::read(&path)
            .map_err(|e| AppError::internal(format!("Failed to read invoice: {e}")))
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_read_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join("uploads")).unwrap();

        let url = store.save("ORD-20250301-1111", b"%PDF-stub").unwrap();
        assert_eq!(url, "/api/uploads/invoice-ORD-20250301-1111.pdf");

        let bytes = store.read("invoice-ORD-20250301-1111.pdf").unwrap();
        assert_eq!(bytes, b"%PDF-stub");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join("uploads")).unwrap();

        assert!(store.resolve("../secret.pdf").is_err());
        assert!(store.resolve("a/b.pdf").is_err());
        assert!(store.resolve("").is_err());
        assert!(store.resolve("invoice-x.pdf").is_ok());
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join("uploads")).unwrap();
        assert!(matches!(
            store.read("invoice-missing.pdf"),
            Err(crate::utils::AppError::NotFound(_))
        ));
    }
}
