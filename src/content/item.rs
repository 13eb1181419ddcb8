//! Statically configured content items

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// A document listed in the site configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Source file name inside the kind's directory
    pub file: String,
    /// Stable identifier, also the key of the like record
    pub slug: String,
}

impl ContentItem {
    pub fn new(file: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            slug: slug.into(),
        }
    }
}

/// Which listing an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Project,
    Blog,
}

impl ContentKind {
    /// Directory prefix for this kind
    pub fn dir<'a>(&self, config: &'a SiteConfig) -> &'a str {
        match self {
            ContentKind::Project => &config.projects_dir,
            ContentKind::Blog => &config.blog_dir,
        }
    }

    /// Document path of an item (directory prefix plus file name)
    pub fn path_of(&self, config: &SiteConfig, item: &ContentItem) -> String {
        let dir = self.dir(config);
        if dir.is_empty() || dir.ends_with('/') {
            format!("{}{}", dir, item.file)
        } else {
            format!("{}/{}", dir, item.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_of() {
        let mut config = SiteConfig::default();
        let item = ContentItem::new("medical-rag.md", "medical-rag");
        assert_eq!(
            ContentKind::Project.path_of(&config, &item),
            "content/projects/medical-rag.md"
        );

        config.blog_dir = "posts".to_string();
        assert_eq!(ContentKind::Blog.path_of(&config, &item), "posts/medical-rag.md");
    }
}
