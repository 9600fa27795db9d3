// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`build`] runs the toolchain steps that produce the binary.
//! - [`supervisor`] starts, tracks and kills the program under development.
//! - [`backend`] provides the `RestartBackend` trait the coordinator drives,
//!   and the `RealRestartBackend` that combines the two above.

pub mod backend;
pub mod build;
pub mod supervisor;

pub use backend::{RealRestartBackend, RestartBackend};
pub use build::{BuildOutcome, BuildRunner};
pub use supervisor::ProcessSupervisor;
