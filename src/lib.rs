//! `churn-synth` library crate.
//!
//! Synthetic customer-churn data: preprocess a reference CSV, train a small
//! GAN on it, and generate new rows in the reference format.
//!
//! The binary (`churn-synth`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline can be driven from other front ends

pub mod app;
pub mod cli;
pub mod codec;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
pub mod train;
pub mod transform;

#[cfg(test)]
mod testing;
