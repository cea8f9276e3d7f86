//! Filepick Core Library
//!
//! This crate provides the domain models, error types, configuration, and the pure
//! validation pieces (acceptance criteria, file classification, rejection messages)
//! shared by the upload control and the command-line tool.

pub mod classifier;
pub mod config;
pub mod criteria;
pub mod error;
pub mod message;
pub mod models;

// Re-export commonly used types
pub use classifier::FileClassifier;
pub use config::{ControlConfig, UploadPolicy, DEFAULT_MAX_FILE_SIZE_BYTES};
pub use criteria::FileCriteria;
pub use error::{FilepickError, LogLevel};
pub use message::{
    format_bytes, format_bytes_with, EnglishCatalog, MessageCatalog, MessageComposer,
};
pub use models::{
    FailedProperty, FeedbackKind, FileStatus, SelectedFileEntry, SystemFile,
    UploadResponseRecord, ValidationFeedback,
};
