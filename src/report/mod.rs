//! Reporting utilities: previews and run summaries.

pub mod format;

pub use format::*;
