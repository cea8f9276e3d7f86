//! Model of the native file input the control wraps.

use std::sync::Arc;

use filepick_core::SystemFile;

/// Path prefix browsers report in a file input's value
const FAKE_PATH_PREFIX: &str = "C:\\fakepath\\";

#[derive(Debug, Default, Clone)]
pub struct FileInput {
    value: String,
    files: Vec<Arc<SystemFile>>,
    pub multiple: bool,
    pub accept: String,
    pub disabled: bool,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn files(&self) -> &[Arc<SystemFile>] {
        &self.files
    }

    pub fn set_files(&mut self, files: Vec<Arc<SystemFile>>) {
        self.value = files
            .first()
            .map(|f| format!("{}{}", FAKE_PATH_PREFIX, f.name))
            .unwrap_or_default();
        self.files = files;
    }

    /// Forget the current value, so choosing the same file again still counts as a change.
    pub fn clear_value(&mut self) {
        self.value.clear();
        self.files.clear();
    }
}
