//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::ContentItem;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    /// When set, documents are fetched over HTTP relative to this URL
    /// instead of being read from the site directory.
    pub source_url: Option<String>,

    // Directory
    pub content_dir: String,
    pub projects_dir: String,
    pub blog_dir: String,
    /// Copied verbatim into the public directory (stylesheets, images)
    pub static_dir: String,
    pub public_dir: String,

    // Content
    pub projects: Vec<ContentItem>,
    pub blog: Vec<ContentItem>,
    #[serde(default)]
    pub excerpt: ExcerptConfig,
    #[serde(default)]
    pub reading: ReadingConfig,

    // Rendering
    pub highlight_theme: String,

    // Likes
    #[serde(default)]
    pub likes: LikesConfig,

    // Contact
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            source_url: None,

            content_dir: "content".to_string(),
            projects_dir: "content/projects/".to_string(),
            blog_dir: "content/blog/".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            projects: Vec::new(),
            blog: Vec::new(),
            excerpt: ExcerptConfig::default(),
            reading: ReadingConfig::default(),

            highlight_theme: "base16-ocean.dark".to_string(),

            likes: LikesConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Find a blog item by slug
    pub fn blog_item(&self, slug: &str) -> Option<&ContentItem> {
        self.blog.iter().find(|item| item.slug == slug)
    }
}

/// Excerpt lengths for summary cards (in characters)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    pub project_length: usize,
    pub blog_length: usize,
    pub omission: String,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            project_length: 200,
            blog_length: 150,
            omission: "...".to_string(),
        }
    }
}

/// Reading time estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Like counter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesConfig {
    /// Real-time database root, e.g. `https://example-default-rtdb.firebaseio.com`.
    /// Leaving it empty disables remote counters.
    pub database_url: Option<String>,
    /// Optional database auth token, sent as the `auth` query parameter
    pub auth: Option<String>,
    pub namespace: String,
    /// Per-profile flag storage (liked state, user id)
    pub local_storage: String,
}

impl Default for LikesConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            auth: None,
            namespace: "blog-likes".to_string(),
            local_storage: ".folio/local_storage.json".to_string(),
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub email: String,
}
