//! GAN training: produces the generator the generation pipeline consumes.

pub mod adam;
pub mod gan;

pub use gan::*;
