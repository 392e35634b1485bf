//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: tree walk, read, write, rename
//!   - `ProgressReporter`: streamed per-item progress
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `RenameService`)

pub mod output;

pub use output::{Filesystem, ProgressReporter, SilentReporter, TreeWalk};

#[cfg(test)]
pub use output::MockProgressReporter;
