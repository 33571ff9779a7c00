//! File I/O subsystem.
//!
//! Thin wrappers around the format libraries: CSV row reading/writing with
//! output rotation, XLSX reading/writing with cell styling, and output-path
//! resolution. The core consumes these as plain functions yielding rows of
//! cells; all validation lives in the models layer.

pub mod csv;
pub mod paths;
pub mod xlsx;

pub use csv::RotatingCsvWriter;
pub use paths::{most_recent_input, save_filename};
