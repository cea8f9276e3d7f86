//! The upload form control
//!
//! `UploadControl` wires user input (file dialog, drag-and-drop, removal requests) and
//! host updates (response lists) to the [`SelectionReconciler`], and reports changes
//! through an [`EventSink`].

use std::sync::Arc;

use filepick_core::{
    ControlConfig, EnglishCatalog, FileCriteria, FilepickError, MessageCatalog,
    SelectedFileEntry, SystemFile, UploadPolicy, UploadResponseRecord,
};

use crate::drop_zone::{DragEvent, DropOutcome, DropZone};
use crate::events::{ControlEvent, EventSink, NoOpEventSink};
use crate::input::FileInput;
use crate::reconciler::{AddFilesOutcome, ReconcileOutcome, SelectionReconciler};

pub struct UploadControl {
    config: ControlConfig,
    reconciler: SelectionReconciler,
    input: FileInput,
    drop_zone: DropZone,
    sink: Arc<dyn EventSink>,
    catalog: Arc<dyn MessageCatalog>,
    initial_responses: Vec<UploadResponseRecord>,
    active: bool,
}

impl UploadControl {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            reconciler: SelectionReconciler::new(),
            input: FileInput::new(),
            drop_zone: DropZone::new(),
            sink: Arc::new(NoOpEventSink),
            catalog: Arc::new(EnglishCatalog),
            initial_responses: Vec::new(),
            active: false,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    // Lifecycle

    /// Start reacting to input. Captures the current response list as the snapshot
    /// `reset` returns to, and attaches the drop zone when enabled.
    pub fn activate(&mut self) {
        self.initial_responses = self.reconciler.responses().to_vec();
        self.sync_input();
        if self.config.enable_drop_zone {
            self.drop_zone.attach();
        }
        self.active = true;
        tracing::debug!(
            multiple = self.config.multiple,
            accept = %self.config.accept,
            drop_zone = self.config.enable_drop_zone,
            "Upload control activated"
        );
    }

    pub fn deactivate(&mut self) {
        self.drop_zone.detach();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // Configuration

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Criteria for the current configuration, rebuilt on every call.
    pub fn criteria(&self) -> FileCriteria {
        self.config.criteria()
    }

    pub fn set_accept(&mut self, accept: impl Into<String>) {
        self.config.accept = accept.into();
        self.sync_input();
    }

    pub fn set_multiple(&mut self, multiple: bool) {
        self.config.multiple = multiple;
        self.sync_input();
    }

    pub fn set_max_file_size_bytes(&mut self, max: u64) {
        self.config.max_file_size_bytes = max;
    }

    pub fn set_upload_policy(&mut self, policy: UploadPolicy) {
        self.config.upload_policy = policy;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        self.sync_input();
    }

    pub fn set_enable_drop_zone(&mut self, enabled: bool) {
        self.config.enable_drop_zone = enabled;
        if !enabled {
            self.drop_zone.detach();
        } else if self.active {
            self.drop_zone.attach();
        }
    }

    fn sync_input(&mut self) {
        self.input.multiple = self.config.multiple;
        self.input.accept = self.config.accept.clone();
        self.input.disabled = self.config.disabled;
    }

    // State

    pub fn selection(&self) -> &[SelectedFileEntry] {
        self.reconciler.selection()
    }

    pub fn response_list(&self) -> &[UploadResponseRecord] {
        self.reconciler.responses()
    }

    pub fn model_value(&self) -> &[Arc<SystemFile>] {
        self.reconciler.model_value()
    }

    pub fn shows_error_feedback(&self) -> bool {
        self.reconciler.shows_error_feedback()
    }

    /// No raw file chosen; backs a required-field check.
    pub fn is_empty(&self) -> bool {
        self.reconciler.model_value().is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.drop_zone.is_dragging()
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    // Native input

    /// The file dialog is about to open.
    pub fn on_click(&mut self) {
        self.input.clear_value();
    }

    /// The file dialog closed with a new set of files.
    pub fn on_change(&mut self, files: Vec<SystemFile>) -> AddFilesOutcome {
        let files: Vec<Arc<SystemFile>> = files.into_iter().map(Arc::new).collect();
        self.input.set_files(files.clone());
        self.process_files(files)
    }

    pub fn handle_drag(&mut self, event: DragEvent) -> Option<AddFilesOutcome> {
        match self.drop_zone.handle(event, self.config.multiple) {
            DropOutcome::Accepted(files) => {
                let files: Vec<Arc<SystemFile>> = files.into_iter().map(Arc::new).collect();
                self.input.set_files(files.clone());
                Some(self.process_files(files))
            }
            DropOutcome::Rejected | DropOutcome::Ignored => None,
        }
    }

    /// Classify and merge chosen files, then announce the accepted ones.
    pub fn process_files(&mut self, files: Vec<Arc<SystemFile>>) -> AddFilesOutcome {
        let criteria = self.criteria();
        let outcome = self.reconciler.add_files(
            files,
            &criteria,
            self.catalog.as_ref(),
            self.config.multiple,
        );

        if !outcome.accepted.is_empty() {
            self.sink.emit(ControlEvent::FileListChanged {
                new_files: outcome.accepted.clone(),
            });
        }

        outcome
    }

    // Host updates

    /// Replace the response list reported by the host and reconcile the selection.
    pub fn set_response_list(&mut self, responses: Vec<UploadResponseRecord>) -> ReconcileOutcome {
        let outcome = self
            .reconciler
            .reconcile(responses, self.config.upload_policy);
        if !outcome.removed.is_empty() {
            self.input.clear_value();
        }
        outcome
    }

    /// A rendered list item asked for its file to be removed.
    ///
    /// Ignored on a disabled control. Under [`UploadPolicy::OnFormSubmit`] the entry is
    /// removed right away; under [`UploadPolicy::OnSelect`] it stays until the host drops
    /// it from the response list. The host is notified either way.
    pub fn request_file_removal(&mut self, name: &str) -> Option<SelectedFileEntry> {
        if self.config.disabled {
            tracing::debug!(file = %name, "Ignoring removal request on disabled control");
            return None;
        }

        let entry = match self.reconciler.get(name) {
            Some(entry) => entry.clone(),
            None => {
                FilepickError::FileNotFound(name.to_string()).log();
                return None;
            }
        };

        if !self.config.upload_on_select() {
            self.reconciler.remove_file(name);
            self.input.clear_value();
        }

        self.sink.emit(ControlEvent::FileRemoved {
            status: entry.status.clone(),
            response: entry.response.clone(),
            removed_file: entry.clone(),
        });

        Some(entry)
    }

    /// Back to the state captured at activation: no local files, initial response list.
    pub fn reset(&mut self) {
        self.reconciler.reset(self.initial_responses.clone());
        self.input.clear_value();
    }

    /// Drop every file and response.
    pub fn clear(&mut self) {
        self.reconciler.clear();
        self.input.clear_value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChannelSink;
    use filepick_core::FileStatus;

    fn control(config: ControlConfig) -> UploadControl {
        let mut control = UploadControl::new(config);
        control.activate();
        control
    }

    #[test]
    fn test_zero_size_limit_accepts_only_empty_files() {
        let config = ControlConfig {
            multiple: true,
            max_file_size_bytes: 0,
            ..Default::default()
        };
        let mut control = control(config);

        control.on_change(vec![
            SystemFile::new("empty.txt", 0, "text/plain"),
            SystemFile::new("one.txt", 1, "text/plain"),
        ]);

        let selection = control.selection();
        assert_eq!(selection[0].status, FileStatus::Success);
        assert_eq!(selection[1].status, FileStatus::Fail);
        assert_eq!(
            selection[1].validation_feedback[0].message,
            "Please select a file with max 0 Bytes."
        );
    }

    #[test]
    fn test_on_change_emits_file_list_changed() {
        let (sink, mut rx) = ChannelSink::new();
        let mut control = control(ControlConfig::default()).with_sink(Arc::new(sink));

        control.on_change(vec![SystemFile::new("foo.txt", 3, "text/plain")]);

        assert_eq!(control.selection().len(), 1);
        assert_eq!(control.response_list().len(), 1);
        assert_eq!(control.input().value(), "C:\\fakepath\\foo.txt");
        match rx.try_recv().unwrap() {
            ControlEvent::FileListChanged { new_files } => {
                assert_eq!(new_files.len(), 1);
                assert_eq!(new_files[0].name(), "foo.txt");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file_emits_nothing() {
        let (sink, mut rx) = ChannelSink::new();
        let config = ControlConfig {
            accept: ".jpg".to_string(),
            ..Default::default()
        };
        let mut control = control(config).with_sink(Arc::new(sink));

        control.on_change(vec![SystemFile::new("foo.txt", 3, "text/plain")]);

        assert_eq!(control.selection()[0].status, FileStatus::Fail);
        assert!(control.shows_error_feedback());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_criteria_follow_setters() {
        let mut control = control(ControlConfig::default());
        control.set_accept(".pdf");
        assert_eq!(control.criteria().allowed_extensions, vec!["pdf"]);
        assert_eq!(control.input().accept, ".pdf");

        assert_eq!(control.criteria().max_file_size_bytes, 524288000);
        control.set_max_file_size_bytes(10);
        assert_eq!(control.criteria().max_file_size_bytes, 10);
        control.set_max_file_size_bytes(0);
        assert_eq!(control.criteria().max_file_size_bytes, 0);
    }

    #[test]
    fn test_on_click_clears_input_value() {
        let mut control = control(ControlConfig::default());
        control.on_change(vec![SystemFile::new("foo.txt", 3, "text/plain")]);
        control.on_click();
        assert_eq!(control.input().value(), "");
        assert_eq!(control.selection().len(), 1);
    }

    #[test]
    fn test_drop_zone_only_when_enabled() {
        let mut control = control(ControlConfig::default());
        let outcome = control.handle_drag(DragEvent::Drop {
            files: vec![SystemFile::new("a.txt", 1, "text/plain")],
            item_count: 1,
        });
        assert!(outcome.is_none());
        assert!(control.selection().is_empty());

        control.set_enable_drop_zone(true);
        let outcome = control.handle_drag(DragEvent::Drop {
            files: vec![SystemFile::new("a.txt", 1, "text/plain")],
            item_count: 1,
        });
        assert_eq!(outcome.unwrap().accepted.len(), 1);
    }

    #[test]
    fn test_deactivate_detaches_drop_zone() {
        let config = ControlConfig {
            enable_drop_zone: true,
            ..Default::default()
        };
        let mut control = control(config);
        control.handle_drag(DragEvent::Enter);
        assert!(control.is_dragging());

        control.deactivate();
        assert!(!control.is_dragging());
        assert!(control.handle_drag(DragEvent::Enter).is_none());
        assert!(!control.is_dragging());
    }
}
