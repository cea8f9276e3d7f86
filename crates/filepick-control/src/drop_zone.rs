//! Drag-and-drop surface
//!
//! The drop zone only listens while attached. The control attaches it when activated
//! with the drop zone enabled and detaches it on deactivation, so a control that is gone
//! never reacts to drag events.

use filepick_core::SystemFile;

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    /// Files dropped on the zone. `item_count` is the number of dragged items, which can
    /// exceed the number of files.
    Drop {
        files: Vec<SystemFile>,
        item_count: usize,
    },
    /// A drop anywhere else in the document
    DropElsewhere,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The zone is detached or the event carries no drop
    Ignored,
    /// Several items dropped on a single-file control, or nothing droppable
    Rejected,
    Accepted(Vec<SystemFile>),
}

#[derive(Debug, Default)]
pub struct DropZone {
    attached: bool,
    is_dragging: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        if !self.attached {
            tracing::debug!("Drop zone attached");
        }
        self.attached = true;
    }

    pub fn detach(&mut self) {
        if self.attached {
            tracing::debug!("Drop zone detached");
        }
        self.attached = false;
        self.is_dragging = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn handle(&mut self, event: DragEvent, multiple: bool) -> DropOutcome {
        if !self.attached {
            return DropOutcome::Ignored;
        }

        match event {
            DragEvent::Enter | DragEvent::Over => {
                self.is_dragging = true;
                DropOutcome::Ignored
            }
            DragEvent::Leave | DragEvent::DropElsewhere => {
                self.is_dragging = false;
                DropOutcome::Ignored
            }
            DragEvent::Drop { files, item_count } => {
                self.is_dragging = false;
                if item_count > 1 && !multiple {
                    tracing::debug!(item_count, "Rejected multi-file drop on single-file control");
                    return DropOutcome::Rejected;
                }
                if files.is_empty() {
                    return DropOutcome::Rejected;
                }
                DropOutcome::Accepted(files)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_of(names: &[&str]) -> DragEvent {
        DragEvent::Drop {
            files: names.iter().map(|n| SystemFile::named(*n)).collect(),
            item_count: names.len(),
        }
    }

    #[test]
    fn test_detached_zone_ignores_events() {
        let mut zone = DropZone::new();
        assert_eq!(zone.handle(DragEvent::Enter, true), DropOutcome::Ignored);
        assert!(!zone.is_dragging());
        assert_eq!(zone.handle(drop_of(&["a.txt"]), true), DropOutcome::Ignored);
    }

    #[test]
    fn test_dragging_state() {
        let mut zone = DropZone::new();
        zone.attach();

        zone.handle(DragEvent::Enter, false);
        assert!(zone.is_dragging());
        zone.handle(DragEvent::Leave, false);
        assert!(!zone.is_dragging());
        zone.handle(DragEvent::Over, false);
        assert!(zone.is_dragging());
        zone.handle(DragEvent::DropElsewhere, false);
        assert!(!zone.is_dragging());
    }

    #[test]
    fn test_drop_clears_dragging() {
        let mut zone = DropZone::new();
        zone.attach();
        zone.handle(DragEvent::Over, true);

        let outcome = zone.handle(drop_of(&["a.txt"]), true);
        assert!(!zone.is_dragging());
        assert!(matches!(outcome, DropOutcome::Accepted(files) if files.len() == 1));
    }

    #[test]
    fn test_multi_drop_rejected_in_single_mode() {
        let mut zone = DropZone::new();
        zone.attach();
        assert_eq!(
            zone.handle(drop_of(&["a.txt", "b.txt"]), false),
            DropOutcome::Rejected
        );
        assert!(matches!(
            zone.handle(drop_of(&["a.txt", "b.txt"]), true),
            DropOutcome::Accepted(_)
        ));
    }

    #[test]
    fn test_empty_drop_rejected() {
        let mut zone = DropZone::new();
        zone.attach();
        let outcome = zone.handle(
            DragEvent::Drop {
                files: vec![],
                item_count: 1,
            },
            true,
        );
        assert_eq!(outcome, DropOutcome::Rejected);
    }

    #[test]
    fn test_detach_resets_dragging() {
        let mut zone = DropZone::new();
        zone.attach();
        zone.handle(DragEvent::Enter, true);
        zone.detach();
        assert!(!zone.is_attached());
        assert!(!zone.is_dragging());
    }
}
