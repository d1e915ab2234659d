//! I/O infrastructure.
//!
//! - [`log`]: Trajectory log readers and writers

pub mod log;
