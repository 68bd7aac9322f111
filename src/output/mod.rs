//! Report rendering

pub mod formatter;

pub use formatter::{OutputFormat, ReportGenerator};
