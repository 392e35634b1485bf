//! Rebrand Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Rebrand
//! bulk rename tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rebrand-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (RenameService + one per stage)       │
//! │         Orchestrates a Run              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Reporter)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rebrand-adapters (Infrastructure)    │
//! │            (LocalFilesystem)            │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (RenameSpec, ExclusionSet, RunReport)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rebrand_core::{
//!     application::{RenameService, SilentReporter},
//!     domain::{EngineConfig, RunMode},
//! };
//!
//! // 1. Describe the rename
//! let config = EngineConfig::for_terms("maestro", "artifex")?
//!     .with_mode(RunMode::DryRun);
//!
//! // 2. Run it with an injected filesystem adapter
//! let service = RenameService::new(Box::new(filesystem));
//! let report = service.run("./repo".as_ref(), &config, &SilentReporter)?;
//! println!("{} changes planned", report.changes());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RenameService, SilentReporter,
        ports::{Filesystem, ProgressReporter, TreeWalk},
    };
    pub use crate::domain::{
        DecodePolicy, EligibleExtensionSet, EngineConfig, EntryKind, ExclusionSet, Outcome, Phase,
        RenameRecord, RenameSpec, RunMode, RunReport, SkipReason, TreeEntry, VariantScope,
    };
    pub use crate::error::{RebrandError, RebrandResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
