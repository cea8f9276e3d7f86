//! Data models for the upload control
//!
//! Chosen files, their per-file status and feedback, and the upload outcomes reported
//! back by the host.

mod file;
mod response;

// Re-export all models for convenient imports
pub use file::*;
pub use response::*;
