//! Application layer for Rebrand.
//!
//! This layer contains:
//! - **Services**: the four engine stages and the `RenameService` that runs them
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; rename rules
//! themselves live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main services
pub use services::{
    ContentRewriter, DirectoryRenamer, FileRenamer, RenameService, TreeScanner,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProgressReporter, SilentReporter};

pub use error::ApplicationError;
