//! PDF De-Artifact Library
//!
//! A cross-platform library for stripping `/Artifact` marked content
//! (page furniture such as running headers, footers and watermarks) from the
//! content streams of a PDF document.
//! This library provides functionality to:
//! - Skip nested marked-content regions (`BMC`/`BDC` ... `EMC`)
//! - Filter artifact regions out of a decoded content stream
//! - Rewrite every page of a document and save a `_filtered` copy
//!
//! # Example
//!
//! ```no_run
//! use pdf_deartifact::pdf::{filter_pdf_file, FilterOptions};
//! use std::path::Path;
//!
//! let report = filter_pdf_file(Path::new("handout.pdf"), &FilterOptions::default())
//!     .expect("Failed to filter PDF");
//! println!("{} artifact regions removed", report.summary.stats.regions_removed);
//! ```

pub mod error;
pub mod paths;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
