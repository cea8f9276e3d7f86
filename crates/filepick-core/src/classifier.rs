use std::collections::BTreeSet;

use crate::criteria::FileCriteria;
use crate::models::{FailedProperty, FileStatus, SystemFile};

/// Chosen-file classifier
///
/// Checks a file against type, extension and size rules. Every applicable rule runs, so
/// the result lists all violations rather than the first one.
pub struct FileClassifier<'a> {
    criteria: &'a FileCriteria,
}

impl<'a> FileClassifier<'a> {
    pub fn new(criteria: &'a FileCriteria) -> Self {
        Self { criteria }
    }

    /// Validate file size
    pub fn size_ok(&self, size: u64) -> bool {
        size <= self.criteria.max_file_size_bytes
    }

    /// Validate MIME type. An empty allow-list accepts everything.
    pub fn mime_type_ok(&self, mime_type: &str) -> bool {
        let allowed = &self.criteria.allowed_mime_types;
        if allowed.is_empty() {
            return true;
        }

        allowed.iter().any(|pattern| match pattern.strip_suffix("/*") {
            Some(main_type) => mime_type
                .strip_prefix(main_type)
                .is_some_and(|rest| rest.starts_with('/')),
            None => pattern == mime_type,
        })
    }

    /// Validate file extension (case-sensitive). An empty allow-list accepts everything.
    pub fn extension_ok(&self, file: &SystemFile) -> bool {
        let allowed = &self.criteria.allowed_extensions;
        if allowed.is_empty() {
            return true;
        }

        match file.extension() {
            Some(ext) => allowed.iter().any(|a| a == ext),
            None => false,
        }
    }

    /// Validate all aspects of a file
    pub fn classify(&self, file: &SystemFile) -> BTreeSet<FailedProperty> {
        let mut failed = BTreeSet::new();

        if !self.size_ok(file.size) {
            failed.insert(FailedProperty::Size);
        }
        if !self.mime_type_ok(&file.mime_type) {
            failed.insert(FailedProperty::Type);
        }
        if !self.extension_ok(file) {
            failed.insert(FailedProperty::Extension);
        }

        if !failed.is_empty() {
            tracing::debug!(
                file = %file.name,
                size = file.size,
                mime_type = %file.mime_type,
                failed = ?failed,
                "File rejected by acceptance criteria"
            );
        }

        failed
    }

    /// Overall status for a set of failed properties
    pub fn status_for(failed: &BTreeSet<FailedProperty>) -> FileStatus {
        if failed.is_empty() {
            FileStatus::Success
        } else {
            FileStatus::Fail
        }
    }
}
