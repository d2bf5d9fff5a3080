//! Build report output
//!
//! Writes the plain-text price summary of a finished build.

mod report;

pub use report::{format_report, write_report};
