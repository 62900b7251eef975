//! Uploads API Handlers
//!
//! Serves stored invoice PDFs from the uploads directory.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/uploads/:file_name - 下载发票 PDF
pub async fn serve(
    State(state): State<ServerState>,
    Path(file_name): Path<String>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let bytes = state.invoices.store().read(&file_name)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("inline; filename=\"{}\"", file_name))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((headers, bytes))
}
