//! Base64 data URLs for previews and inline payloads

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Guess a MIME type from a file name
pub fn guess_mime_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Read a whole file and encode it as a data URL. Read errors are returned
/// as-is.
#[cfg(not(target_arch = "wasm32"))]
pub async fn read_file_as_data_url(
    path: impl AsRef<std::path::Path>,
) -> std::io::Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime_type = guess_mime_type(&path.to_string_lossy());
    Ok(encode_data_url(&mime_type, &bytes))
}

/// A decoded base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn parse(url: &str) -> crate::Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| crate::Error::Decode("missing data: scheme".into()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| crate::Error::Decode("missing payload separator".into()))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| crate::Error::Decode("only base64 data URLs are supported".into()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| crate::Error::Decode(e.to_string()))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode_data_url("text/plain", b"hi"), "data:text/plain;base64,aGk=");
        assert_eq!(encode_data_url("", b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(DataUrl::parse("https://example.com/logo.png").is_err());
        assert!(DataUrl::parse("data:image/png;base64").is_err());
        assert!(DataUrl::parse("data:text/plain,hello").is_err());
        assert!(DataUrl::parse("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_parse_encoded() {
        let url = encode_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        let parsed = DataUrl::parse(&url).unwrap();
        assert!(parsed.is_image());
        assert_eq!(parsed.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("logo.svg"), "image/svg+xml");
        assert_eq!(guess_mime_type("members.csv"), "text/csv");
        assert_eq!(guess_mime_type("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_read_file_as_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let url = read_file_as_data_url(&path).await.unwrap();
        assert_eq!(url, "data:text/plain;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_read_missing_file_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file_as_data_url(dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
