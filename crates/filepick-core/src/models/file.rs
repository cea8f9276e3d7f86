use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use super::response::UploadResponseRecord;

/// A file chosen on the host platform. Only its descriptive attributes are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemFile {
    pub name: String,
    pub size: u64,
    /// Empty when the platform could not determine a type
    #[serde(default)]
    pub mime_type: String,
}

impl SystemFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Placeholder for a file known only by name, e.g. one restored from a response list.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, 0, "")
    }

    /// Text after the final `.` of the name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Upload status of a selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileStatus {
    Success,
    Fail,
    Loading,
    /// Any other status reported by the host
    Custom(String),
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Success => write!(f, "SUCCESS"),
            FileStatus::Fail => write!(f, "FAIL"),
            FileStatus::Loading => write!(f, "LOADING"),
            FileStatus::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for FileStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FileStatus::from(s.to_string()))
    }
}

impl From<String> for FileStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SUCCESS" => FileStatus::Success,
            "FAIL" => FileStatus::Fail,
            "LOADING" => FileStatus::Loading,
            _ => FileStatus::Custom(s),
        }
    }
}

impl From<FileStatus> for String {
    fn from(status: FileStatus) -> Self {
        status.to_string()
    }
}

/// Acceptance rule a file violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FailedProperty {
    Type,
    Extension,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFeedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl ValidationFeedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Error,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Success,
        }
    }
}

/// One file in the control's selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFileEntry {
    pub system_file: Arc<SystemFile>,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub failed_properties: BTreeSet<FailedProperty>,
    #[serde(default)]
    pub validation_feedback: Vec<ValidationFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<UploadResponseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl SelectedFileEntry {
    pub fn name(&self) -> &str {
        &self.system_file.name
    }

    /// Whether the entry failed local acceptance checks
    pub fn has_failed_properties(&self) -> bool {
        !self.failed_properties.is_empty()
    }

    /// Entry restored from a host-reported record when nothing was selected locally.
    pub fn from_response(record: &UploadResponseRecord) -> Self {
        let message = record.error_message.clone().unwrap_or_default();
        let kind = if message.is_empty() {
            FeedbackKind::Success
        } else {
            FeedbackKind::Error
        };
        Self {
            system_file: Arc::new(SystemFile::named(record.name.clone())),
            status: record.status.clone(),
            failed_properties: BTreeSet::new(),
            validation_feedback: vec![ValidationFeedback { message, kind }],
            response: Some(record.clone()),
            download_url: record.download_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_after_final_dot() {
        assert_eq!(SystemFile::named("archive.tar.gz").extension(), Some("gz"));
        assert_eq!(SystemFile::named("photo.JPG").extension(), Some("JPG"));
        assert_eq!(SystemFile::named("README").extension(), None);
        assert_eq!(SystemFile::named("trailing.").extension(), Some(""));
    }

    #[test]
    fn test_file_status_string_forms() {
        assert_eq!("SUCCESS".parse::<FileStatus>().unwrap(), FileStatus::Success);
        assert_eq!("FAIL".parse::<FileStatus>().unwrap(), FileStatus::Fail);
        assert_eq!("LOADING".parse::<FileStatus>().unwrap(), FileStatus::Loading);
        assert_eq!(
            "QUEUED".parse::<FileStatus>().unwrap(),
            FileStatus::Custom("QUEUED".to_string())
        );
        assert_eq!(FileStatus::Custom("QUEUED".to_string()).to_string(), "QUEUED");
        assert_eq!(FileStatus::from("FAIL".to_string()), FileStatus::Fail);
    }

    #[test]
    fn test_file_status_serde_as_plain_string() {
        let json = serde_json::to_string(&FileStatus::Fail).unwrap();
        assert_eq!(json, "\"FAIL\"");
        let status: FileStatus = serde_json::from_str("\"uploading\"").unwrap();
        assert_eq!(status, FileStatus::Custom("uploading".to_string()));
    }

    #[test]
    fn test_failed_property_serde() {
        let json = serde_json::to_string(&FailedProperty::Extension).unwrap();
        assert_eq!(json, "\"EXTENSION\"");
    }

    #[test]
    fn test_entry_from_response_with_error() {
        let record = UploadResponseRecord {
            name: "report.pdf".to_string(),
            status: FileStatus::Fail,
            error_message: Some("Virus detected".to_string()),
            download_url: None,
        };
        let entry = SelectedFileEntry::from_response(&record);
        assert_eq!(entry.name(), "report.pdf");
        assert_eq!(entry.status, FileStatus::Fail);
        assert_eq!(entry.validation_feedback[0].kind, FeedbackKind::Error);
        assert_eq!(entry.validation_feedback[0].message, "Virus detected");
        assert!(!entry.has_failed_properties());
    }

    #[test]
    fn test_entry_from_response_with_download_url() {
        let record = UploadResponseRecord {
            name: "a.txt".to_string(),
            status: FileStatus::Success,
            error_message: None,
            download_url: Some("/download/a".to_string()),
        };
        let entry = SelectedFileEntry::from_response(&record);
        assert_eq!(entry.download_url.as_deref(), Some("/download/a"));
        assert_eq!(entry.validation_feedback[0].kind, FeedbackKind::Success);
    }
}
