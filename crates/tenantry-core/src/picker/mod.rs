//! File picker state machine
//!
//! The picker behind every logo field. It is a plain value updated through
//! [`PickerState::reduce`]; side effects (invoking callbacks, starting an
//! image decode, resetting the browse input) come back as [`PickerEffect`]s
//! for the host to run. The browser widget and the CLI drive the same
//! machine.

mod local;
mod state;

pub use local::LocalFile;
pub use state::{
    DecodeError, PickerEffect, PickerError, PickerEvent, PickerOptions, PickerState, Transition,
};

/// A file offered to the picker.
pub trait PickedFile: Clone {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    /// Declared MIME type, possibly empty.
    fn mime_type(&self) -> &str;

    fn is_image(&self) -> bool {
        self.mime_type().starts_with("image/")
    }
}
