//! Filepick upload control
//!
//! The stateful half of the file picker: the selection state machine, the control that
//! drives it from user input and host updates, the drag-and-drop surface, and the
//! notifications sent back to the host.

pub mod control;
pub mod drop_zone;
pub mod events;
pub mod input;
pub mod reconciler;

pub use control::UploadControl;
pub use drop_zone::{DragEvent, DropOutcome, DropZone};
pub use events::{ChannelSink, ControlEvent, EventSink, NoOpEventSink};
pub use input::FileInput;
pub use reconciler::{AddFilesOutcome, ReconcileOutcome, SelectionReconciler};
