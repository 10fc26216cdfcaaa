// Service exports
pub mod catalog;
pub mod pdf;

pub use catalog::{load_dictionary, load_jobs, CatalogError};
pub use pdf::{extract_pdf_text, PdfError};
