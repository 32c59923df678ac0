//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed column set and its kinds (`Column`, `ColumnKind`)
//! - column order as read from a reference file (`Schema`)
//! - labeled and numeric tables (`Table`, `NumericTable`)

pub mod types;

pub use types::*;
