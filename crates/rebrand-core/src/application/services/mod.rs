//! Application services - orchestrate use cases.
//!
//! One service per engine stage, plus `RenameService`, which runs the stages
//! in order for a single root.

pub mod content_rewriter;
pub mod directory_renamer;
pub mod file_renamer;
pub mod recorder;
pub mod rename_service;
pub mod scanner;

pub use content_rewriter::ContentRewriter;
pub use directory_renamer::DirectoryRenamer;
pub use file_renamer::FileRenamer;
pub use recorder::Recorder;
pub use rename_service::RenameService;
pub use scanner::TreeScanner;
