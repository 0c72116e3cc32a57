//! PDF content stream filtering module

pub mod scanner;
pub mod filter;
pub mod process;

// Re-export commonly used items
pub use scanner::{skip_marked_content, Skipped};
pub use filter::{filter_operations, ArtifactFilter, FilterOptions, FilterStats};
pub use process::{filter_document, filter_pdf_file, filter_pdf_file_to, DocumentSummary, FilterReport};
