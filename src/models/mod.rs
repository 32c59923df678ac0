//! Generator models.
//!
//! The core treats a generator as an opaque callable (`Generator`); the
//! dense-network implementation produced by `train` lives alongside it.

pub mod generator;

pub use generator::*;
