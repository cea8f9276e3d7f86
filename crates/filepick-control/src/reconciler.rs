//! Selection state machine
//!
//! Keeps the ordered, name-unique list of selected files in step with two sources: files
//! the user chooses locally, and the upload outcomes the host reports back. Every
//! operation runs to completion on `&mut self`, so no caller can observe a half-applied
//! update.

use std::collections::HashSet;
use std::sync::Arc;

use filepick_core::{
    FileClassifier, FileCriteria, MessageCatalog, MessageComposer, SelectedFileEntry, SystemFile,
    UploadPolicy, UploadResponseRecord, ValidationFeedback,
};

/// Result of merging a batch of chosen files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddFilesOutcome {
    /// New entries that passed the acceptance checks, in input order
    pub accepted: Vec<SelectedFileEntry>,
    /// Names of new entries that failed the acceptance checks
    pub rejected: Vec<String>,
    /// Names skipped because a file with the same name was already selected
    pub duplicates: Vec<String>,
}

impl AddFilesOutcome {
    /// Nothing new was chosen, so the selection is untouched
    pub fn is_noop(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Result of reconciling against a response list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Entries created from records because the selection was empty
    pub seeded: usize,
    /// Entries whose status was overwritten by a matching record
    pub updated: usize,
    /// Entries dropped because no record mentions them any more
    pub removed: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SelectionReconciler {
    selection: Vec<SelectedFileEntry>,
    responses: Vec<UploadResponseRecord>,
    model_value: Vec<Arc<SystemFile>>,
    shows_error_feedback: bool,
    prev_has_errors: bool,
}

impl SelectionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[SelectedFileEntry] {
        &self.selection
    }

    pub fn responses(&self) -> &[UploadResponseRecord] {
        &self.responses
    }

    pub fn model_value(&self) -> &[Arc<SystemFile>] {
        &self.model_value
    }

    /// Whether the aggregate "error" feedback is raised
    pub fn shows_error_feedback(&self) -> bool {
        self.shows_error_feedback
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SelectedFileEntry> {
        self.selection.iter().find(|e| e.name() == name)
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Merge newly chosen files into the selection.
    ///
    /// Files whose name is already selected are skipped. In single mode a non-empty batch
    /// replaces the whole selection. Failed files stay in the selection with an error
    /// message but are left out of `accepted`.
    pub fn add_files(
        &mut self,
        files: Vec<Arc<SystemFile>>,
        criteria: &FileCriteria,
        catalog: &dyn MessageCatalog,
        multiple: bool,
    ) -> AddFilesOutcome {
        let mut outcome = AddFilesOutcome::default();
        let mut seen = HashSet::new();
        let mut newly_chosen = Vec::with_capacity(files.len());

        for file in files {
            if self.contains(&file.name) || !seen.insert(file.name.clone()) {
                outcome.duplicates.push(file.name.clone());
                continue;
            }
            newly_chosen.push(file);
        }

        if !outcome.duplicates.is_empty() {
            tracing::debug!(duplicates = ?outcome.duplicates, "Skipping already selected files");
        }

        if newly_chosen.is_empty() {
            return outcome;
        }

        if !multiple {
            self.selection.clear();
            self.responses.clear();
            self.model_value.clear();
        }

        let classifier = FileClassifier::new(criteria);
        let composer = MessageComposer::new(catalog);

        for file in newly_chosen {
            let failed_properties = classifier.classify(&file);
            let status = FileClassifier::status_for(&failed_properties);
            let validation_feedback = composer.feedback_for(criteria, &failed_properties);

            let record = match validation_feedback.first() {
                Some(feedback) => UploadResponseRecord::failure(&*file.name, &*feedback.message),
                None => UploadResponseRecord::success(&*file.name),
            };

            let entry = SelectedFileEntry {
                system_file: Arc::clone(&file),
                status,
                failed_properties,
                validation_feedback,
                response: None,
                download_url: None,
            };

            if entry.has_failed_properties() {
                outcome.rejected.push(entry.name().to_string());
            } else {
                outcome.accepted.push(entry.clone());
            }

            self.responses.push(record);
            self.model_value.push(file);
            self.selection.push(entry);
        }

        self.refresh_error_feedback();

        tracing::info!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            duplicates = outcome.duplicates.len(),
            selected = self.selection.len(),
            "Merged chosen files into selection"
        );

        outcome
    }

    /// Apply a response list reported by the host.
    ///
    /// An empty selection is first seeded from the records, one entry per name. Entries
    /// without a matching record are dropped under [`UploadPolicy::OnSelect`]; entries with
    /// one take over the first matching record's status, message and download URL.
    pub fn reconcile(
        &mut self,
        responses: Vec<UploadResponseRecord>,
        policy: UploadPolicy,
    ) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();
        self.responses = responses;

        if self.selection.is_empty() && !self.responses.is_empty() {
            let mut seen = HashSet::new();
            self.selection = self
                .responses
                .iter()
                .filter(|record| seen.insert(record.name.as_str()))
                .map(SelectedFileEntry::from_response)
                .collect();
            outcome.seeded = self.selection.len();
        }

        let mut orphaned = Vec::new();
        for entry in self.selection.iter_mut() {
            let record = self.responses.iter().find(|r| r.name == entry.name());

            match record {
                None if policy.upload_on_select() => orphaned.push(entry.name().to_string()),
                None => {}
                Some(record) => {
                    entry.response = Some(record.clone());
                    entry.status = record.status.clone();
                    if let Some(url) = &record.download_url {
                        entry.download_url = Some(url.clone());
                    }
                    let message = record.error_message.clone().unwrap_or_default();
                    entry.validation_feedback = vec![if record.has_error() {
                        ValidationFeedback::error(message)
                    } else {
                        ValidationFeedback::success(message)
                    }];
                    outcome.updated += 1;
                }
            }
        }

        for name in &orphaned {
            self.remove_entry(name);
        }
        outcome.removed = orphaned;

        self.refresh_error_feedback();

        tracing::debug!(
            seeded = outcome.seeded,
            updated = outcome.updated,
            removed = ?outcome.removed,
            "Reconciled selection with response list"
        );

        outcome
    }

    /// Remove a file by name from the selection and the model value.
    pub fn remove_file(&mut self, name: &str) -> Option<SelectedFileEntry> {
        let removed = self.remove_entry(name);
        if removed.is_some() {
            self.refresh_error_feedback();
        }
        removed
    }

    fn remove_entry(&mut self, name: &str) -> Option<SelectedFileEntry> {
        let index = self.selection.iter().position(|e| e.name() == name)?;
        let removed = self.selection.remove(index);
        self.model_value.retain(|f| f.name != name);
        Some(removed)
    }

    /// Drop the local selection and restore the given response snapshot.
    pub fn reset(&mut self, initial_responses: Vec<UploadResponseRecord>) {
        self.selection.clear();
        self.model_value.clear();
        self.responses = initial_responses;
        self.refresh_error_feedback();
    }

    /// Drop the selection, response snapshot and model value.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.model_value.clear();
        self.responses.clear();
        self.refresh_error_feedback();
    }

    fn refresh_error_feedback(&mut self) {
        let has_errors = self.selection.iter().any(|e| e.has_failed_properties());

        if has_errors {
            self.shows_error_feedback = true;
        } else if self.prev_has_errors && self.shows_error_feedback {
            self.shows_error_feedback = false;
        }
        self.prev_has_errors = has_errors;
    }
}
