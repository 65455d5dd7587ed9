//! Image uploads and the blob store they are written to.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Extensions accepted by the image upload endpoint (compared lower-cased).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Url prefix uploaded files are served under.
pub const UPLOADS_URL: &str = "/static/uploads";

/// Opaque file storage keyed by filename.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` under `filename`, replacing any previous file.
    async fn put(&self, filename: &str, data: &[u8]) -> Result<()>;

    /// Public url of a stored file.
    fn public_url(&self, filename: &str) -> String;
}

/// Files on local disk, served by the static file route.
pub struct LocalBlobStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, filename: &str, data: &[u8]) -> Result<()> {
        if filename != sanitize_filename(filename) || filename.is_empty() {
            anyhow::bail!("refusing to store unsanitized filename {filename:?}");
        }

        fs::create_dir_all(&self.base_path)
            .await
            .context("failed to create upload directory")?;

        let path = self.base_path.join(filename);
        let mut file = fs::File::create(&path)
            .await
            .context("failed to create file")?;
        file.write_all(data).await.context("failed to write file")?;
        file.flush().await.context("failed to flush file")?;

        tracing::debug!(path = ?path, size = data.len(), "file written");
        Ok(())
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), filename)
    }
}

/// Whether `filename` has an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Directory components are stripped, every character outside
/// `[A-Za-z0-9._-]` becomes `_`, and leading dots are trimmed so the result is
/// never hidden or a relative path. May return an empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect::<String>()
        .trim_start_matches('.')
        .chars()
        .take(200)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.JPEG"));
        assert!(allowed_file("archive.tar.webp"));
        assert!(!allowed_file("script.php"));
        assert!(!allowed_file("noextension"));
        assert!(!allowed_file("png"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my photo.jpg"), "my_photo.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\pic.png"), "pic.png");
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
        assert_eq!(sanitize_filename("фото.png"), "____.png");
        assert_eq!(sanitize_filename("shell;rm -rf.gif"), "shell_rm_-rf.gif");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[tokio::test]
    async fn local_store_writes_under_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("uploads"), "/static/uploads/");

        store.put("pic.png", b"png-bytes").await.unwrap();

        let written = std::fs::read(dir.path().join("uploads/pic.png")).unwrap();
        assert_eq!(written, b"png-bytes");
        assert_eq!(store.public_url("pic.png"), "/static/uploads/pic.png");
    }

    #[tokio::test]
    async fn local_store_refuses_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), UPLOADS_URL);

        assert!(store.put("../escape.png", b"x").await.is_err());
    }
}
