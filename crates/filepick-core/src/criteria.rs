//! Acceptance criteria derived from an `accept` string and a size limit.

use serde::{Deserialize, Serialize};

/// Allowed MIME types, extensions and maximum size for chosen files.
///
/// Built from a comma separated accept string. Whitespace and dots are removed from the
/// whole string before splitting, so `".jpg, .png"` and `"jpg,png"` are equivalent. Tokens
/// containing `/` are MIME patterns, everything else is an extension. Tokens are kept as
/// written: no de-duplication, no syntax check. Only an empty accept string means size-only;
/// a whitespace-only one normalizes to a single empty extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCriteria {
    pub allowed_mime_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
    pub max_file_size_bytes: u64,
}

impl FileCriteria {
    pub fn new(accept: &str, max_file_size_bytes: u64) -> Self {
        if accept.is_empty() {
            return Self {
                allowed_mime_types: Vec::new(),
                allowed_extensions: Vec::new(),
                max_file_size_bytes,
            };
        }

        let normalized: String = accept
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect();

        let (allowed_mime_types, allowed_extensions): (Vec<String>, Vec<String>) = normalized
            .split(',')
            .map(str::to_string)
            .partition(|token| token.contains('/'));

        Self {
            allowed_mime_types,
            allowed_extensions,
            max_file_size_bytes,
        }
    }

    /// True when only the size limit applies.
    pub fn is_size_only(&self) -> bool {
        self.allowed_mime_types.is_empty() && self.allowed_extensions.is_empty()
    }
}
