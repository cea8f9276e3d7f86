//! Rejection messages for files that fail the acceptance criteria.
//!
//! The message restates what the control accepts ("Please select a .jpg or .png file with
//! max 500MB.") rather than naming the violated rule. Wording comes from a
//! [`MessageCatalog`] so hosts can plug in their own localization.

use std::collections::BTreeSet;

use crate::criteria::FileCriteria;
use crate::models::{FailedProperty, ValidationFeedback};

const BYTE_UNITS: [&str; 7] = [" bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count with 1024-based units, e.g. `1536` -> `"1.5KB"`.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, 2)
}

/// Format a byte count, rounding to `decimals` places and dropping trailing zeros.
pub fn format_bytes_with(bytes: u64, decimals: u32) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{}{}", rounded, BYTE_UNITS[unit])
}

/// Localized message templates
pub trait MessageCatalog: Send + Sync {
    /// No type or extension restriction, only a size limit
    fn allowed_file_size(&self, max_size: &str) -> String;

    /// Exactly one allowed type or extension
    fn allowed_file_simple(&self, allowed_type: &str, max_size: &str) -> String;

    /// Several allowed types or extensions
    fn allowed_file_complex(&self, allowed_types: &str, last_type: &str, max_size: &str)
        -> String;
}

/// Built-in English wording
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn allowed_file_size(&self, max_size: &str) -> String {
        format!("Please select a file with max {}.", max_size)
    }

    fn allowed_file_simple(&self, allowed_type: &str, max_size: &str) -> String {
        format!(
            "Please select a(n) {} file with max {}.",
            allowed_type, max_size
        )
    }

    fn allowed_file_complex(
        &self,
        allowed_types: &str,
        last_type: &str,
        max_size: &str,
    ) -> String {
        format!(
            "Please select a {} or {} file with max {}.",
            allowed_types, last_type, max_size
        )
    }
}

pub struct MessageComposer<'a> {
    catalog: &'a dyn MessageCatalog,
}

impl<'a> MessageComposer<'a> {
    pub fn new(catalog: &'a dyn MessageCatalog) -> Self {
        Self { catalog }
    }

    /// Human readable labels for the accepted files. Extensions win over MIME types.
    pub fn display_types(criteria: &FileCriteria) -> Vec<String> {
        if !criteria.allowed_extensions.is_empty() {
            return criteria
                .allowed_extensions
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect();
        }

        criteria
            .allowed_mime_types
            .iter()
            .map(|mime| {
                if let Some(main_type) = mime.strip_suffix("/*") {
                    main_type.to_string()
                } else if mime == "text/plain" {
                    "text".to_string()
                } else {
                    let sub_type = mime.split_once('/').map_or(mime.as_str(), |(_, s)| s);
                    let sub_type = sub_type.split('+').next().unwrap_or(sub_type);
                    format!(".{}", sub_type)
                }
            })
            .collect()
    }

    pub fn compose(&self, criteria: &FileCriteria) -> String {
        let max_size = format_bytes(criteria.max_file_size_bytes);
        let mut types = Self::display_types(criteria);

        match types.pop() {
            None => self.catalog.allowed_file_size(&max_size),
            Some(last) if last.is_empty() => self.catalog.allowed_file_size(&max_size),
            Some(last) if types.is_empty() => self.catalog.allowed_file_simple(&last, &max_size),
            Some(last) => {
                self.catalog
                    .allowed_file_complex(&types.join(", "), &last, &max_size)
            }
        }
    }

    /// Feedback for a classified file: one error entry when anything failed, else nothing.
    pub fn feedback_for(
        &self,
        criteria: &FileCriteria,
        failed: &BTreeSet<FailedProperty>,
    ) -> Vec<ValidationFeedback> {
        if failed.is_empty() {
            Vec::new()
        } else {
            vec![ValidationFeedback::error(self.compose(criteria))]
        }
    }
}
