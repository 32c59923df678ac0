//! Table ↔ model-space transforms.
//!
//! - `preprocess`: encode + fit/apply normalization (training direction)
//! - `postprocess`: decode + type casts (generation direction)

pub mod postprocess;
pub mod preprocess;

pub use postprocess::*;
pub use preprocess::*;
