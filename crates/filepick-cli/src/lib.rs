use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use filepick_control::{ChannelSink, ControlEvent, UploadControl};
use filepick_core::{
    ControlConfig, EnglishCatalog, FileCriteria, MessageComposer, SelectedFileEntry, SystemFile,
    UploadResponseRecord,
};

/// Bytes read from the start of a file for type sniffing
const SNIFF_LEN: usize = 8192;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Guess a MIME type from leading bytes. Unknown binary content yields an empty string,
/// the same as a browser that cannot tell.
pub fn sniff_mime_type(head: &[u8]) -> String {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }
    if !head.is_empty() && std::str::from_utf8(head).is_ok() {
        return "text/plain".to_string();
    }
    String::new()
}

/// Describe a local file the way a browser file picker would.
pub async fn system_file_from_path(path: &Path) -> anyhow::Result<SystemFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    (&mut file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    Ok(SystemFile::new(name, metadata.len(), sniff_mime_type(&head)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaReport {
    pub criteria: FileCriteria,
    pub rejection_message: String,
}

pub fn criteria_report(accept: &str, max_file_size_bytes: u64) -> CriteriaReport {
    let criteria = FileCriteria::new(accept, max_file_size_bytes);
    let rejection_message = MessageComposer::new(&EnglishCatalog).compose(&criteria);
    CriteriaReport {
        criteria,
        rejection_message,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub selection: Vec<SelectedFileEntry>,
    pub responses: Vec<UploadResponseRecord>,
    pub events: Vec<ControlEvent>,
    pub shows_error_feedback: bool,
}

/// Run files through a fresh control, optionally followed by a host response list.
pub fn run_check(
    config: ControlConfig,
    files: Vec<SystemFile>,
    responses: Option<Vec<UploadResponseRecord>>,
) -> CheckReport {
    let (sink, mut rx) = ChannelSink::new();
    let mut control = UploadControl::new(config).with_sink(Arc::new(sink));
    control.activate();

    control.on_change(files);
    if let Some(responses) = responses {
        control.set_response_list(responses);
    }

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    CheckReport {
        selection: control.selection().to_vec(),
        responses: control.response_list().to_vec(),
        events,
        shows_error_feedback: control.shows_error_feedback(),
    }
}
