//! Where raw documents come from

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Fetches raw document text by relative path
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Reads documents from the site directory
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        tokio::fs::read_to_string(&full)
            .await
            .with_context(|| format!("Failed to read {:?}", full))
    }
}

/// Fetches documents over HTTP GET relative to a base URL
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("GET {} returned {}", url, response.status()));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        std::fs::write(dir.path().join("content/blog/a.md"), "hello").unwrap();

        let source = FileSource::new(dir.path());
        assert_eq!(source.fetch("content/blog/a.md").await.unwrap(), "hello");
        assert_eq!(source.fetch("/content/blog/a.md").await.unwrap(), "hello");
        assert!(source.fetch("content/blog/missing.md").await.is_err());
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpSource::new("https://example.com/");
        assert_eq!(
            source.url_for("content/blog/a.md"),
            "https://example.com/content/blog/a.md"
        );
    }
}
