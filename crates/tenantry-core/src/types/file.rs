//! File payloads handed to the storage service

use serde::{Deserialize, Serialize};

/// A file read into memory, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            mime_type: if mime_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime_type
            },
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Extension used when building storage paths, taken from the file name
    /// and falling back to the MIME subtype.
    pub fn extension(&self) -> String {
        if let Some((_, ext)) = self.name.rsplit_once('.') {
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return ext.to_ascii_lowercase();
            }
        }
        if self.mime_type == "application/octet-stream" {
            return "bin".to_string();
        }
        mime_guess::get_mime_extensions_str(&self.mime_type)
            .and_then(|exts| exts.first())
            .map(|ext| ext.to_string())
            .unwrap_or_else(|| "bin".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_name() {
        let file = FilePayload::new("Logo.PNG", "image/png", vec![1, 2, 3]);
        assert_eq!(file.extension(), "png");
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn test_extension_falls_back_to_mime() {
        let file = FilePayload::new("logo", "image/png", vec![]);
        assert_eq!(file.extension(), "png");

        let unknown = FilePayload::new("blob", "", vec![]);
        assert_eq!(unknown.mime_type, "application/octet-stream");
        assert_eq!(unknown.extension(), "bin");
    }
}
