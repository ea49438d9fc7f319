//! PDF Certificates Library
//!
//! A cross-platform library for batch-generating personalized PDF
//! certificates. It provides functionality to:
//! - Resolve spreadsheet column letters to indices
//! - Center text inside a bounding box on a PDF page
//! - Overlay text onto every page of a PDF template
//! - Iterate spreadsheet rows into one output document per row
//! - Discover system fonts and list them for the user
//!
//! # Example
//!
//! ```no_run
//! use pdf_certificates::batch::{run_batch, BatchOptions};
//! use pdf_certificates::fonts::FontCatalog;
//! use pdf_certificates::layout::BoundingBox;
//! use pdf_certificates::style::StyleSpec;
//! use std::path::PathBuf;
//!
//! let options = BatchOptions {
//!     spreadsheet: PathBuf::from("input_data.xlsx"),
//!     template: PathBuf::from("certificate_template.pdf"),
//!     output_dir: PathBuf::from("output"),
//!     name_column: 1,
//!     phone_column: 3,
//!     bbox: BoundingBox::new(150.0, 300.0, 450.0, 360.0).unwrap(),
//!     style: StyleSpec::default(),
//! };
//!
//! let catalog = FontCatalog::system();
//! let summary = run_batch(&options, &catalog).expect("batch failed");
//! println!("processed {}, skipped {}", summary.processed, summary.skipped);
//! ```

pub mod batch;
pub mod column;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod style;

// Re-export commonly used items
pub use error::{Error, Result};
