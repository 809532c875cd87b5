use super::{PickedFile, PickerError};
use crate::types::FilePayload;
use crate::utils::{encode_data_url, guess_mime_type};

/// A file held in memory, picked from the local filesystem or built in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    /// MIME type is guessed from the file name.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            mime_type: guess_mime_type(&name),
            name,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::from_bytes(name, bytes))
    }

    /// Open a file only when its size on disk is within `max_bytes`.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn open_within(path: impl AsRef<std::path::Path>, max_bytes: u64) -> crate::Result<Self> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();
        if size > max_bytes {
            return Err(PickerError::SizeExceeded {
                size,
                max: max_bytes,
            }
            .into());
        }
        Ok(Self::open(path).await?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The preview a browser would produce for this file.
    pub fn to_data_url(&self) -> String {
        encode_data_url(&self.mime_type, &self.bytes)
    }

    pub fn into_payload(self) -> FilePayload {
        FilePayload::new(self.name, self.mime_type, self.bytes)
    }
}

impl PickedFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{PickerEffect, PickerEvent, PickerOptions, PickerState};

    #[test]
    fn test_from_bytes_guesses_mime() {
        let file = LocalFile::from_bytes("logo.png", vec![1, 2]);
        assert_eq!(file.mime_type(), "image/png");
        assert!(file.is_image());
        assert_eq!(file.size(), 2);

        let payload = file.into_payload();
        assert_eq!(payload.name, "logo.png");
        assert_eq!(payload.mime_type, "image/png");
    }

    #[test]
    fn test_drive_picker_with_local_file() {
        let file = LocalFile::from_bytes("logo.png", b"png-bytes".to_vec());
        let mut state = PickerState::new(PickerOptions::new("image/*", 1024), None);

        let t = state.reduce(PickerEvent::Select(file.clone()));
        state = t.state;
        for effect in t.effects {
            if let PickerEffect::StartDecode(f) = effect {
                state = state.reduce(PickerEvent::DecodeFinished(Ok(f.to_data_url()))).state;
            }
        }

        assert_eq!(state.preview(), Some(file.to_data_url().as_str()));
    }

    #[tokio::test]
    async fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brand.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        let file = LocalFile::open(&path).await.unwrap();
        assert_eq!(file.name(), "brand.svg");
        assert_eq!(file.mime_type(), "image/svg+xml");
        assert_eq!(file.bytes(), b"<svg/>");
    }

    #[tokio::test]
    async fn test_open_within_checks_size_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.png");
        std::fs::File::create(&path)
            .unwrap()
            .set_len(8 * 1024 * 1024 * 1024)
            .unwrap();

        let err = LocalFile::open_within(&path, 1024).await.unwrap_err();
        assert_eq!(err.code(), "SizeExceeded");

        let small = dir.path().join("logo.png");
        std::fs::write(&small, [1, 2, 3]).unwrap();
        let file = LocalFile::open_within(&small, 3).await.unwrap();
        assert_eq!(file.size(), 3);

        let missing = LocalFile::open_within(dir.path().join("none.png"), 1024).await;
        assert_eq!(missing.unwrap_err().code(), "IoError");
    }
}
