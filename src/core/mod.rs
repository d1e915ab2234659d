//! Core foundation layer.
//!
//! Bottom layer of the crate with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Core data types (poses, benchmark samples, timestamps)

pub mod types;
