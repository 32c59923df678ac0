//! Numeric building blocks: min-max normalization and dense networks.

pub mod mlp;
pub mod normalizer;

pub use mlp::*;
pub use normalizer::*;
