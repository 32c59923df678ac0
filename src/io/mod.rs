//! Input/output helpers.
//!
//! - CSV ingest + schema validation (`ingest`)
//! - CSV export of generated tables (`export`)
//! - generator artifact JSON read/write (`artifact`)

pub mod artifact;
pub mod export;
pub mod ingest;

pub use artifact::*;
pub use export::*;
pub use ingest::*;
