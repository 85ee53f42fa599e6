//! Local file uploader.
//!
//! Files are referenced in place rather than copied. Each upload replaces the
//! session's file list with the files of that batch.

use async_trait::async_trait;
use docgen_core::conversation::{UploadCollaborator, UploadOutcome, UploadedFile};
use docgen_core::{DocgenError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Infers the MIME type from a file name.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Upload collaborator backed by the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct LocalFileUploader;

impl LocalFileUploader {
    pub fn new() -> Self {
        Self
    }

    async fn describe(path: &Path) -> Result<UploadedFile> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            DocgenError::io(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(DocgenError::io(format!(
                "Not a regular file: '{}'",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(UploadedFile {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            path: path.to_path_buf(),
            mime_type: infer_mime_type(path),
            size: metadata.len(),
            uploaded_at: chrono::Utc::now().timestamp(),
        })
    }
}

#[async_trait]
impl UploadCollaborator for LocalFileUploader {
    async fn handle_file_upload(&self, paths: Vec<PathBuf>) -> Result<UploadOutcome> {
        let mut messages = Vec::with_capacity(paths.len());
        let mut accepted = Vec::new();

        for path in &paths {
            match Self::describe(path).await {
                Ok(file) => {
                    tracing::debug!(
                        target: "docgen::upload",
                        name = %file.name,
                        mime = %file.mime_type,
                        size = file.size,
                        "File accepted"
                    );
                    messages.push(format!("File uploaded: {}", file.name));
                    accepted.push(file);
                }
                Err(e) => {
                    tracing::warn!(target: "docgen::upload", "{}", e);
                    messages.push(format!("Could not upload {}: {}", path.display(), e));
                }
            }
        }

        Ok(UploadOutcome {
            messages,
            files: accepted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_records_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("outline.json");
        std::fs::write(&path, "{\"title\": \"Title\"}").unwrap();

        let uploader = LocalFileUploader::new();
        let outcome = uploader.handle_file_upload(vec![path.clone()]).await.unwrap();

        assert_eq!(outcome.messages, vec!["File uploaded: outline.json".to_string()]);
        assert_eq!(outcome.files.len(), 1);
        let file = &outcome.files[0];
        assert_eq!(file.name, "outline.json");
        assert_eq!(file.path, path);
        assert_eq!(file.mime_type, "application/json");
        assert_eq!(file.size, 18);
        assert!(!file.id.is_empty());
    }

    #[tokio::test]
    async fn test_each_upload_replaces_the_list() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.txt");
        let second = temp_dir.path().join("b.bin");
        std::fs::write(&first, "a").unwrap();
        std::fs::write(&second, [0u8, 1, 2]).unwrap();

        let uploader = LocalFileUploader::new();
        let outcome = uploader.handle_file_upload(vec![first]).await.unwrap();
        assert_eq!(outcome.files[0].mime_type, "text/plain");

        let outcome = uploader.handle_file_upload(vec![second]).await.unwrap();
        let names: Vec<_> = outcome.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.bin"]);
        assert_eq!(outcome.files[0].mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present.json");
        std::fs::write(&present, "{}").unwrap();
        let missing = temp_dir.path().join("missing.json");

        let uploader = LocalFileUploader::new();
        let outcome = uploader
            .handle_file_upload(vec![missing, present])
            .await
            .unwrap();

        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.messages[0].starts_with("Could not upload"));
        assert_eq!(outcome.messages[1], "File uploaded: present.json");
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let uploader = LocalFileUploader::new();
        let outcome = uploader
            .handle_file_upload(vec![temp_dir.path().to_path_buf()])
            .await
            .unwrap();

        assert!(outcome.files.is_empty());
        assert!(outcome.messages[0].contains("Not a regular file"));
    }
}
