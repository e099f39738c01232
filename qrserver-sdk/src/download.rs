// ABOUTME: Download helper that saves a rendered QR image under a suggested file name
// ABOUTME: Works from a source URL and a file name only, independent of any UI

use crate::client::QrClient;
use crate::error::QrError;
use crate::options::Format;
use std::path::{Path, PathBuf};

/// Fetch `src` and save it as `dest_dir/filename`.
///
/// The payload must match the format named by the file extension; nothing is
/// written when it does not.
pub async fn download(
    client: &QrClient,
    src: &str,
    filename: &str,
    dest_dir: &Path,
) -> Result<PathBuf, QrError> {
    let bytes = client.fetch_image(src).await?;

    match format_for_filename(filename) {
        Some(format) => verify_payload(&bytes, format)?,
        None => log::debug!("No known image extension on {}, skipping payload check", filename),
    }

    save_image(&bytes, dest_dir, filename).await
}

/// Fail with `FormatMismatch` unless `bytes` look like a `format` image
pub fn verify_payload(bytes: &[u8], format: Format) -> Result<(), QrError> {
    if format.matches_payload(bytes) {
        Ok(())
    } else {
        Err(QrError::FormatMismatch {
            format,
            size: bytes.len(),
        })
    }
}

fn format_for_filename(filename: &str) -> Option<Format> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

/// Write image bytes to `dest_dir`, creating the directory when needed
pub async fn save_image(bytes: &[u8], dest_dir: &Path, filename: &str) -> Result<PathBuf, QrError> {
    tokio::fs::create_dir_all(dest_dir).await?;

    let path = dest_dir.join(sanitize_filename(filename));
    tokio::fs::write(&path, bytes).await?;

    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Replace anything outside `[A-Za-z0-9._-]` with `-`
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    // A bare "." or ".." would point outside the file name
    if sanitized.trim_matches('.').is_empty() {
        "qr-code".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("qr-code-example.png"), "qr-code-example.png");
        assert_eq!(sanitize_filename("qr code example.png"), "qr-code-example.png");
        assert_eq!(sanitize_filename("../etc/passwd"), "..-etc-passwd");
        assert_eq!(sanitize_filename("[::1].png"), "---1-.png");
        assert_eq!(sanitize_filename(".."), "qr-code");
        assert_eq!(sanitize_filename(""), "qr-code");
    }

    #[tokio::test]
    async fn test_save_image_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("nested").join("dir");

        let path = save_image(b"GIF89a", &dest, "qr-code-example.gif")
            .await
            .unwrap();

        assert_eq!(path, dest.join("qr-code-example.gif"));
        assert_eq!(std::fs::read(&path).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let mut server = Server::new_async().await;
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let mock = server
            .mock("GET", "/render")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "image/svg+xml")
            .with_body(svg)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = QrClient::new().unwrap();
        let src = format!("{}/render?&format=svg&data=x", server.url());

        let path = download(&client, &src, "qr-code-example.svg", temp_dir.path())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(path.file_name().unwrap(), "qr-code-example.svg");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), svg);
    }

    #[test]
    fn test_verify_payload() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert!(verify_payload(&png, Format::Png).is_ok());
        assert!(verify_payload(&png, Format::Jpeg).is_err());
        assert!(verify_payload(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10], Format::Jpg).is_ok());
        assert!(verify_payload(b"GIF89a\x01\x00\x01\x00", Format::Gif).is_ok());
        assert!(verify_payload(b"GIF87a", Format::Gif).is_ok());
        assert!(
            verify_payload(
                b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
                Format::Svg
            )
            .is_ok()
        );
        assert!(verify_payload(b"%!PS-Adobe-3.0 EPSF-3.0", Format::Eps).is_ok());
        assert!(matches!(
            verify_payload(b"<html>error</html>", Format::Svg),
            Err(QrError::FormatMismatch {
                format: Format::Svg,
                size: 18
            })
        ));
    }

    #[test]
    fn test_format_for_filename() {
        assert_eq!(format_for_filename("qr-code-example.png"), Some(Format::Png));
        assert_eq!(format_for_filename("qr-code-example.jpg"), Some(Format::Jpg));
        assert_eq!(format_for_filename("qr-code"), None);
        assert_eq!(format_for_filename("qr-code.tiff"), None);
    }

    #[tokio::test]
    async fn test_download_rejects_mismatched_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/render")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body("<html>error page</html>")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = QrClient::new().unwrap();
        let src = format!("{}/render?&format=png&data=x", server.url());

        let err = download(&client, &src, "qr-code-x.png", temp_dir.path())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            QrError::FormatMismatch {
                format: Format::Png,
                size: 23
            }
        ));
        assert!(!temp_dir.path().join("qr-code-x.png").exists());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_download_does_not_write_on_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = QrClient::new().unwrap();
        let src = format!("{}/missing", server.url());

        let result = download(&client, &src, "qr-code.png", temp_dir.path()).await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(!temp_dir.path().join("qr-code.png").exists());
    }
}
