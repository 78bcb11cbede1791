//! Ingestion: turns uploaded bytes into one text blob per document.
//!
//! `Ok(String::new())` means extraction worked and the document has no text;
//! `Err(ExtractionError)` means the bytes could not be read at all.

pub mod contact;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Extraction task aborted: {0}")]
    Aborted(String),
}

/// A text extraction backend for one document format.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// Page-based documents via `pdf-extract`. Runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
    }
}

/// UTF-8 text files. Invalid sequences are replaced rather than rejected.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Picks a backend from the file extension (`.pdf`, `.txt`, `.md`).
pub fn extractor_for(file_name: &str) -> Result<Box<dyn TextExtractor>, ExtractionError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfTextExtractor)),
        "txt" | "text" | "md" => Ok(Box::new(PlainTextExtractor)),
        _ => Err(ExtractionError::Unsupported(file_name.to_string())),
    }
}

/// Extracts the text of one uploaded file.
pub async fn extract_upload(file_name: &str, bytes: Bytes) -> Result<String, ExtractionError> {
    let extractor = extractor_for(file_name)?;
    let text = extractor.extract(bytes).await?;
    debug!(
        "Extracted {} words from {file_name}",
        text.split_whitespace().count()
    );
    Ok(text)
}
