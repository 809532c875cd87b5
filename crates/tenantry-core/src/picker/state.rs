use tracing::{debug, warn};

use super::PickedFile;
use crate::utils::format_size;

/// Options recognized by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// MIME filter for the browse dialog. Advisory only.
    pub accepted_types: String,
    pub max_size_bytes: u64,
}

impl PickerOptions {
    pub fn new(accepted_types: impl Into<String>, max_size_bytes: u64) -> Self {
        Self {
            accepted_types: accepted_types.into(),
            max_size_bytes,
        }
    }
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self::new(crate::DEFAULT_LOGO_TYPES, crate::DEFAULT_MAX_LOGO_BYTES)
    }
}

/// Inline validation failure shown inside the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    SizeExceeded { size: u64, max: u64 },
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::SizeExceeded { size, max } => write!(
                f,
                "File is too large ({}). Maximum size is {}.",
                format_size(*size),
                format_size(*max)
            ),
        }
    }
}

impl From<PickerError> for crate::Error {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::SizeExceeded { size, max } => crate::Error::SizeExceeded { size, max },
        }
    }
}

/// Failure reported by the host while decoding an image preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError(pub String);

#[derive(Debug, Clone)]
pub enum PickerEvent<F> {
    /// A file chosen through the browse dialog.
    Select(F),
    DragEnter,
    DragOver,
    DragLeave,
    /// Files dropped on the zone, in drop order.
    Drop(Vec<F>),
    /// An image decode started by [`PickerEffect::StartDecode`] completed.
    DecodeFinished(Result<String, DecodeError>),
    Clear,
    /// The caller supplied a different existing preview URL.
    ExistingUrlChanged(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEffect<F> {
    /// Forward the accepted file to the caller's selection callback.
    Selected(F),
    /// Read the file as a data URL and report back with `DecodeFinished`.
    StartDecode(F),
    /// Invoke the caller's clear callback.
    Cleared,
    /// Reset the browse input so the same file name can be picked again.
    ResetInput,
}

/// Next state plus the effects the host must run.
#[derive(Debug, Clone)]
pub struct Transition<F> {
    pub state: PickerState<F>,
    pub effects: Vec<PickerEffect<F>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerState<F> {
    options: PickerOptions,
    selected: Option<F>,
    preview: Option<String>,
    error: Option<PickerError>,
    dragging: bool,
}

impl<F: PickedFile> PickerState<F> {
    pub fn new(options: PickerOptions, existing_preview_url: Option<String>) -> Self {
        Self {
            options,
            selected: None,
            preview: existing_preview_url.filter(|url| !url.is_empty()),
            error: None,
            dragging: false,
        }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn selected(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn error(&self) -> Option<&PickerError> {
        self.error.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Check a file against the size limit without touching state.
    pub fn validate(&self, file: &F) -> Result<(), PickerError> {
        if file.size() > self.options.max_size_bytes {
            return Err(PickerError::SizeExceeded {
                size: file.size(),
                max: self.options.max_size_bytes,
            });
        }
        Ok(())
    }

    pub fn reduce(self, event: PickerEvent<F>) -> Transition<F> {
        match event {
            PickerEvent::Select(file) => self.select(file),
            PickerEvent::DragEnter | PickerEvent::DragOver => Self::settle(Self {
                dragging: true,
                ..self
            }),
            PickerEvent::DragLeave => Self::settle(Self {
                dragging: false,
                ..self
            }),
            PickerEvent::Drop(files) => {
                let state = Self {
                    dragging: false,
                    ..self
                };
                match files.into_iter().next() {
                    Some(first) => state.select(first),
                    None => Self::settle(state),
                }
            }
            PickerEvent::DecodeFinished(Ok(url)) => Self::settle(Self {
                preview: Some(url),
                ..self
            }),
            PickerEvent::DecodeFinished(Err(DecodeError(reason))) => {
                warn!(reason = %reason, "Image preview decode failed, keeping previous preview");
                Self::settle(self)
            }
            PickerEvent::Clear => Transition {
                state: Self {
                    selected: None,
                    preview: None,
                    error: None,
                    ..self
                },
                effects: vec![PickerEffect::ResetInput, PickerEffect::Cleared],
            },
            PickerEvent::ExistingUrlChanged(url) => Self::settle(Self {
                preview: url.filter(|url| !url.is_empty()),
                ..self
            }),
        }
    }

    fn select(self, file: F) -> Transition<F> {
        if let Err(err) = self.validate(&file) {
            debug!(name = file.name(), size = file.size(), "Rejected file selection");
            return Self::settle(Self {
                error: Some(err),
                ..self
            });
        }

        debug!(name = file.name(), size = file.size(), "File selected");
        let mut effects = vec![PickerEffect::Selected(file.clone())];
        if file.is_image() {
            effects.push(PickerEffect::StartDecode(file.clone()));
        }

        // The preview of an image stays as it was until its decode finishes.
        let preview = if file.is_image() { self.preview } else { None };

        Transition {
            state: Self {
                selected: Some(file),
                preview,
                error: None,
                ..self
            },
            effects,
        }
    }

    fn settle(state: Self) -> Transition<F> {
        Transition {
            state,
            effects: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::encode_data_url;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    }

    impl FakeFile {
        fn new(name: &str, mime: &str, len: usize) -> Self {
            Self {
                name: name.to_string(),
                mime: mime.to_string(),
                bytes: vec![7; len],
            }
        }
    }

    impl PickedFile for FakeFile {
        fn name(&self) -> &str {
            &self.name
        }
        fn size(&self) -> u64 {
            self.bytes.len() as u64
        }
        fn mime_type(&self) -> &str {
            &self.mime
        }
    }

    fn picker(max: u64) -> PickerState<FakeFile> {
        PickerState::new(PickerOptions::new("image/*", max), None)
    }

    fn selected_count(effects: &[PickerEffect<FakeFile>]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, PickerEffect::Selected(_)))
            .count()
    }

    #[test]
    fn test_existing_url_is_initial_preview() {
        let state: PickerState<FakeFile> = PickerState::new(
            PickerOptions::default(),
            Some("https://cdn.example.com/logo.png".into()),
        );
        assert_eq!(state.preview(), Some("https://cdn.example.com/logo.png"));
        assert!(state.selected().is_none());

        let empty: PickerState<FakeFile> = PickerState::new(PickerOptions::default(), Some(String::new()));
        assert!(empty.preview().is_none());
    }

    #[test]
    fn test_files_within_limit_selected_once() {
        for len in [0usize, 1, 99, 100] {
            let file = FakeFile::new("doc.pdf", "application/pdf", len);
            let t = picker(100).reduce(PickerEvent::Select(file.clone()));
            assert_eq!(selected_count(&t.effects), 1);
            assert_eq!(t.effects[0], PickerEffect::Selected(file.clone()));
            assert_eq!(t.state.selected(), Some(&file));
        }
    }

    #[test]
    fn test_oversized_file_rejected_without_state_change() {
        let small = FakeFile::new("a.txt", "text/plain", 10);
        let state = picker(100).reduce(PickerEvent::Select(small.clone())).state;

        let big = FakeFile::new("huge.png", "image/png", 101);
        let t = state.clone().reduce(PickerEvent::Select(big));

        assert!(t.effects.is_empty());
        assert_eq!(t.state.selected(), Some(&small));
        assert_eq!(t.state.preview(), state.preview());
        assert_eq!(
            t.state.error(),
            Some(&PickerError::SizeExceeded { size: 101, max: 100 })
        );
        assert!(t.state.error().unwrap().to_string().contains("Maximum size is 100 B"));
    }

    #[test]
    fn test_oversized_file_keeps_existing_preview() {
        let state: PickerState<FakeFile> = PickerState::new(
            PickerOptions::new("image/*", 10),
            Some("https://cdn.example.com/old.png".into()),
        );
        let t = state.reduce(PickerEvent::Select(FakeFile::new("big.png", "image/png", 11)));
        assert_eq!(t.state.preview(), Some("https://cdn.example.com/old.png"));
        assert!(t.state.selected().is_none());
    }

    #[test]
    fn test_image_preview_after_decode() {
        let file = FakeFile::new("logo.png", "image/png", 16);
        let t = picker(1024).reduce(PickerEvent::Select(file.clone()));
        assert_eq!(
            t.effects,
            vec![
                PickerEffect::Selected(file.clone()),
                PickerEffect::StartDecode(file.clone())
            ]
        );
        assert!(t.state.preview().is_none());

        let url = encode_data_url(&file.mime, &file.bytes);
        let t = t.state.reduce(PickerEvent::DecodeFinished(Ok(url.clone())));
        assert_eq!(t.state.preview(), Some(url.as_str()));
    }

    #[test]
    fn test_non_image_clears_preview() {
        let state: PickerState<FakeFile> = PickerState::new(
            PickerOptions::new("*/*", 1024),
            Some("https://cdn.example.com/logo.png".into()),
        );
        let t = state.reduce(PickerEvent::Select(FakeFile::new("terms.pdf", "application/pdf", 3)));
        assert!(t.state.preview().is_none());
        assert!(!t.effects.iter().any(|e| matches!(e, PickerEffect::StartDecode(_))));
    }

    #[test]
    fn test_successful_selection_clears_error() {
        let state = picker(5)
            .reduce(PickerEvent::Select(FakeFile::new("big.txt", "text/plain", 6)))
            .state;
        assert!(state.error().is_some());
        let state = state
            .reduce(PickerEvent::Select(FakeFile::new("ok.txt", "text/plain", 5)))
            .state;
        assert!(state.error().is_none());
    }

    #[test]
    fn test_decode_failure_keeps_prior_preview() {
        let state: PickerState<FakeFile> = PickerState::new(
            PickerOptions::default(),
            Some("https://cdn.example.com/old.png".into()),
        );
        let state = state
            .reduce(PickerEvent::Select(FakeFile::new("bad.png", "image/png", 4)))
            .state;
        let t = state.reduce(PickerEvent::DecodeFinished(Err(DecodeError("corrupt".into()))));
        assert_eq!(t.state.preview(), Some("https://cdn.example.com/old.png"));
        assert!(t.state.error().is_none());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_clear_always_empties() {
        let file = FakeFile::new("logo.png", "image/png", 4);
        let states = vec![
            picker(100),
            PickerState::new(PickerOptions::default(), Some("https://x/y.png".into())),
            picker(100)
                .reduce(PickerEvent::Select(file.clone()))
                .state
                .reduce(PickerEvent::DecodeFinished(Ok("data:image/png;base64,AA==".into())))
                .state,
            picker(1)
                .reduce(PickerEvent::Select(file))
                .state,
        ];

        for state in states {
            let t = state.reduce(PickerEvent::Clear);
            assert!(t.state.selected().is_none());
            assert!(t.state.preview().is_none());
            assert!(t.state.error().is_none());
            assert_eq!(t.effects, vec![PickerEffect::ResetInput, PickerEffect::Cleared]);
        }
    }

    #[test]
    fn test_drag_lifecycle() {
        let state = picker(100).reduce(PickerEvent::DragEnter).state;
        assert!(state.is_dragging());
        let state = state.reduce(PickerEvent::DragOver).state;
        assert!(state.is_dragging());
        let state = state.reduce(PickerEvent::DragLeave).state;
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_drop_zero_files_leaves_state_unchanged() {
        let file = FakeFile::new("a.txt", "text/plain", 1);
        let before = picker(100).reduce(PickerEvent::Select(file)).state;
        let dragging = before.clone().reduce(PickerEvent::DragEnter).state;

        let t = dragging.reduce(PickerEvent::Drop(Vec::new()));
        assert!(t.effects.is_empty());
        assert!(!t.state.is_dragging());
        assert_eq!(t.state, before);
    }

    #[test]
    fn test_drop_selects_first_file_only() {
        let first = FakeFile::new("first.txt", "text/plain", 1);
        let second = FakeFile::new("second.txt", "text/plain", 1);
        let t = picker(100)
            .reduce(PickerEvent::DragEnter)
            .state
            .reduce(PickerEvent::Drop(vec![first.clone(), second]));

        assert_eq!(t.effects, vec![PickerEffect::Selected(first.clone())]);
        assert_eq!(t.state.selected(), Some(&first));
        assert!(!t.state.is_dragging());
    }

    #[test]
    fn test_drop_oversized_first_file_is_rejected() {
        let big = FakeFile::new("big.txt", "text/plain", 200);
        let small = FakeFile::new("small.txt", "text/plain", 1);
        let t = picker(100).reduce(PickerEvent::Drop(vec![big, small]));
        assert!(t.effects.is_empty());
        assert!(t.state.selected().is_none());
        assert!(t.state.error().is_some());
    }

    #[test]
    fn test_last_decode_to_finish_wins() {
        let a = FakeFile::new("a.png", "image/png", 1);
        let b = FakeFile::new("b.png", "image/png", 2);
        let state = picker(100)
            .reduce(PickerEvent::Select(a))
            .state
            .reduce(PickerEvent::Select(b))
            .state;

        let state = state
            .reduce(PickerEvent::DecodeFinished(Ok("data:image/png;base64,Yg==".into())))
            .state
            .reduce(PickerEvent::DecodeFinished(Ok("data:image/png;base64,YQ==".into())))
            .state;
        assert_eq!(state.preview(), Some("data:image/png;base64,YQ=="));
    }

    #[test]
    fn test_existing_url_change_replaces_preview() {
        let state = picker(100)
            .reduce(PickerEvent::ExistingUrlChanged(Some("https://x/new.png".into())))
            .state;
        assert_eq!(state.preview(), Some("https://x/new.png"));
        let state = state.reduce(PickerEvent::ExistingUrlChanged(None)).state;
        assert!(state.preview().is_none());
    }

    #[test]
    fn test_picker_error_converts() {
        let err: crate::Error = PickerError::SizeExceeded { size: 3, max: 2 }.into();
        assert_eq!(err.code(), "SizeExceeded");
    }
}
