//! Configuration module
//!
//! Control configuration: acceptance rules, multiplicity, drop zone and upload policy.
//! Values can be built in code or loaded from `FILEPICK_*` environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::criteria::FileCriteria;
use crate::error::FilepickError;

/// Default maximum file size (500MB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 524_288_000;

/// When the host uploads chosen files, which decides how removals are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPolicy {
    /// Files are uploaded as soon as they are chosen. The response list is the source of
    /// truth: removals wait for the host to drop the record, and entries missing from the
    /// response list are removed on reconciliation.
    OnSelect,
    /// Files are uploaded with the surrounding form. Removals apply immediately.
    #[default]
    OnFormSubmit,
}

impl UploadPolicy {
    pub fn from_upload_on_select(upload_on_select: bool) -> Self {
        if upload_on_select {
            UploadPolicy::OnSelect
        } else {
            UploadPolicy::OnFormSubmit
        }
    }

    pub fn upload_on_select(&self) -> bool {
        matches!(self, UploadPolicy::OnSelect)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Comma separated MIME types and/or extensions, e.g. `".jpg, .png"` or `"image/*"`
    pub accept: String,
    pub multiple: bool,
    pub max_file_size_bytes: u64,
    pub enable_drop_zone: bool,
    pub upload_policy: UploadPolicy,
    pub disabled: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            accept: String::new(),
            multiple: false,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            enable_drop_zone: false,
            upload_policy: UploadPolicy::default(),
            disabled: false,
        }
    }
}

impl ControlConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Missing or unparsable values
    /// fall back to the defaults, except the size limit which must be a valid number.
    /// Any size is accepted; a limit of 0 lets only empty files through.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v.trim().to_lowercase())
                .and_then(|v| match v.as_str() {
                    "1" | "true" | "yes" | "on" => Some(true),
                    "0" | "false" | "no" | "off" => Some(false),
                    _ => None,
                })
                .unwrap_or(default)
        };

        let max_file_size_bytes = match lookup("FILEPICK_MAX_FILE_SIZE_BYTES") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                FilepickError::InvalidConfig(
                    "FILEPICK_MAX_FILE_SIZE_BYTES must be a valid number of bytes".to_string(),
                )
            })?,
            None => defaults.max_file_size_bytes,
        };

        Ok(ControlConfig {
            accept: lookup("FILEPICK_ACCEPT").unwrap_or(defaults.accept),
            multiple: flag("FILEPICK_MULTIPLE", defaults.multiple),
            max_file_size_bytes,
            enable_drop_zone: flag("FILEPICK_ENABLE_DROP_ZONE", defaults.enable_drop_zone),
            upload_policy: UploadPolicy::from_upload_on_select(flag(
                "FILEPICK_UPLOAD_ON_SELECT",
                defaults.upload_policy.upload_on_select(),
            )),
            disabled: flag("FILEPICK_DISABLED", defaults.disabled),
        })
    }

    /// Acceptance criteria for the current configuration.
    pub fn criteria(&self) -> FileCriteria {
        FileCriteria::new(&self.accept, self.max_file_size_bytes)
    }

    pub fn upload_on_select(&self) -> bool {
        self.upload_policy.upload_on_select()
    }
}
