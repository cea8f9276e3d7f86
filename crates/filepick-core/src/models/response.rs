use serde::{Deserialize, Serialize};
use validator::Validate;

use super::file::FileStatus;
use crate::error::FilepickError;

/// Per-file upload outcome reported by the host, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseRecord {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl UploadResponseRecord {
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Success,
            error_message: None,
            download_url: None,
        }
    }

    pub fn failure(name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Fail,
            error_message: Some(error_message.into()),
            download_url: None,
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    /// True when the record carries a non-empty error message
    pub fn has_error(&self) -> bool {
        self.error_message.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Parse and validate a JSON array of records, as delivered by an upload service.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, FilepickError> {
        let records: Vec<Self> = serde_json::from_str(json)?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_camel_case() {
        let json = r#"[
            {"name": "file1.txt", "status": "SUCCESS", "downloadUrl": "/downloadFile"},
            {"name": "file2.txt", "status": "FAIL", "errorMessage": "something went wrong"}
        ]"#;
        let records = UploadResponseRecord::parse_list(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].download_url.as_deref(), Some("/downloadFile"));
        assert!(!records[0].has_error());
        assert_eq!(records[1].status, FileStatus::Fail);
        assert!(records[1].has_error());
    }

    #[test]
    fn test_parse_list_rejects_empty_name() {
        let json = r#"[{"name": "", "status": "SUCCESS"}]"#;
        let err = UploadResponseRecord::parse_list(json).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RESPONSE");
    }

    #[test]
    fn test_parse_list_rejects_malformed_json() {
        let err = UploadResponseRecord::parse_list("{").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_empty_error_message_is_not_an_error() {
        let record = UploadResponseRecord::failure("a.txt", "");
        assert!(!record.has_error());
    }

    #[test]
    fn test_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&UploadResponseRecord::success("a.txt")).unwrap();
        assert_eq!(json, r#"{"name":"a.txt","status":"SUCCESS"}"#);
    }
}
