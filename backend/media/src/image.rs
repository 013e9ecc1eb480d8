//! Image encoding for request payloads.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use imgextract_core::{EncodedImage, ExtractError};
use tokio::fs;
use tracing::debug;

/// Read an image and base64-encode it.
///
/// The file is re-read on every call. Contents that do not start with a known
/// image signature are rejected, so a renamed text file fails here instead of
/// at the API.
pub async fn encode_image(path: &Path) -> Result<EncodedImage, ExtractError> {
    let bytes = fs::read(path).await.map_err(|e| ExtractError::ImageRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mime_type = sniff_mime_type(&bytes).ok_or_else(|| ExtractError::ImageRead {
        path: path.to_path_buf(),
        message: "not valid image data".to_string(),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), mime = mime_type, "Encoded image");
    Ok(EncodedImage {
        mime_type: mime_type.to_string(),
        base64: STANDARD.encode(&bytes),
    })
}

/// MIME type from the file signature, or `None` if it is not an image.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    ::image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";

    #[test]
    fn sniffs_known_signatures() {
        assert_eq!(sniff_mime_type(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime_type(JPEG_HEADER), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(b"BM\0\0\0\0\0\0"), Some("image/bmp"));
        assert_eq!(sniff_mime_type(b"hello world"), None);
        assert_eq!(sniff_mime_type(b""), None);
    }

    #[tokio::test]
    async fn encodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let encoded = encode_image(&path).await.unwrap();
        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(STANDARD.decode(&encoded.base64).unwrap(), PNG_HEADER);
        assert!(encoded.data_url().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_image(&dir.path().join("gone.png")).await.unwrap_err();
        assert!(matches!(err, ExtractError::ImageRead { .. }));
    }

    #[tokio::test]
    async fn non_image_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, "definitely not a jpeg").unwrap();
        let err = encode_image(&path).await.unwrap_err();
        assert!(err.to_string().contains("not valid image data"));
    }
}
