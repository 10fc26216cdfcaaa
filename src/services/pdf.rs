use thiserror::Error;

use crate::error::MatchError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Errors that can occur when pulling text out of an uploaded resume
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Please upload a PDF file.")]
    NotPdf,

    #[error("Failed to parse PDF.")]
    Parse(#[from] pdf_extract::OutputError),
}

impl From<PdfError> for MatchError {
    fn from(err: PdfError) -> Self {
        if let PdfError::Parse(source) = &err {
            tracing::info!("PDF parsing failed: {}", source);
        }
        MatchError::Validation(err.to_string())
    }
}

/// Extract the text layer of a PDF document
///
/// Parsing is CPU bound and synchronous; async callers should run it on a
/// blocking thread.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)?;
    tracing::debug!("Extracted {} characters from {} byte PDF", text.len(), bytes.len());
    Ok(text)
}
