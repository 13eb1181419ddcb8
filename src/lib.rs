//! folio-rs: a portfolio site builder
//!
//! Projects and blog posts are markdown files with a small front-matter
//! header. Blog posts carry a like counter kept in a hosted real-time
//! database, while each local profile remembers whether it liked a post.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod likes;
pub mod server;
pub mod viewer;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{DocumentSource, FileSource, HttpSource, MarkdownRenderer};
use likes::{CounterStore, FileStorage, FlagStore, LikeStore, MemoryStorage, RealtimeDbStore};

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (projects and blog posts)
    pub content_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        }
    }

    /// Where documents are fetched from: `source_url` over HTTP, otherwise
    /// the site directory
    pub fn document_source(&self) -> Arc<dyn DocumentSource> {
        match &self.config.source_url {
            Some(url) if !url.is_empty() => Arc::new(HttpSource::new(url.clone())),
            _ => Arc::new(FileSource::new(self.base_dir.clone())),
        }
    }

    /// Like store for this site.
    ///
    /// Without a `likes.database_url` the store is unconfigured and only
    /// returns fallbacks. An unreadable local storage file is replaced by
    /// in-memory storage for this run.
    pub fn like_store(&self) -> LikeStore {
        let likes = &self.config.likes;

        let remote: Option<Arc<dyn CounterStore>> = match &likes.database_url {
            Some(url) if !url.is_empty() => {
                Some(Arc::new(RealtimeDbStore::new(url.clone(), likes.auth.clone())))
            }
            _ => {
                tracing::debug!("No like database configured");
                None
            }
        };

        let storage_path = self.base_dir.join(&likes.local_storage);
        let local: Arc<dyn FlagStore> = match FileStorage::open(&storage_path) {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                tracing::warn!(
                    "Local storage {:?} unavailable ({}), liked state will not persist",
                    storage_path,
                    e
                );
                Arc::new(MemoryStorage::new())
            }
        };

        LikeStore::new(remote, local, likes.namespace.clone())
    }

    /// Markdown renderer using the configured highlight theme
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_theme(&self.config.highlight_theme)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::build::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.public_dir, dir.path().join("public"));
        assert_eq!(folio.content_dir, dir.path().join("content"));
        assert!(!folio.like_store().is_configured());
    }

    #[test]
    fn test_new_with_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "title: Mine\npublic_dir: dist\nlikes:\n  database_url: https://demo.firebaseio.com\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Mine");
        assert_eq!(folio.public_dir, dir.path().join("dist"));
        assert!(folio.like_store().is_configured());
    }

    #[test]
    fn test_broken_local_storage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".folio")).unwrap();
        std::fs::write(dir.path().join(".folio/local_storage.json"), "{broken").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let likes = folio.like_store();
        assert!(!likes.get_liked("anything"));
        assert!(likes.user_id().is_some());
    }
}
