//! Create a new blog post or project document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentItem, ContentKind};
use crate::Folio;

/// Write a new document scaffold and return its path plus the config entry
/// that lists it
pub fn create(folio: &Folio, kind: ContentKind, title: &str) -> Result<(PathBuf, ContentItem)> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let item = ContentItem::new(format!("{}.md", slug), slug);
    let file_path = folio
        .base_dir
        .join(kind.path_of(&folio.config, &item));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = match kind {
        ContentKind::Blog => format!(
            "---\ntitle: {}\ndate: {}\ntags: []\nlikes: 0\n---\n",
            title,
            chrono::Local::now().format("%Y-%m-%d")
        ),
        ContentKind::Project => format!("---\ntitle: {}\ntags: []\n---\n", title),
    };

    fs::write(&file_path, content)?;
    Ok((file_path, item))
}

/// Run the new command
pub fn run(folio: &Folio, kind: ContentKind, title: &str) -> Result<()> {
    let (path, item) = create(folio, kind, title)?;
    let section = match kind {
        ContentKind::Blog => "blog",
        ContentKind::Project => "projects",
    };

    println!("Created: {:?}", path);
    println!("Add it to the `{}:` list in _config.yml:", section);
    println!("  - file: {}\n    slug: {}", item.file, item.slug);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Document;

    #[test]
    fn test_create_blog_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let (path, item) = create(&folio, ContentKind::Blog, "Optimizing ML Pipelines").unwrap();
        assert_eq!(item.slug, "optimizing-ml-pipelines");
        assert_eq!(path, dir.path().join("content/blog/optimizing-ml-pipelines.md"));

        let doc = Document::parse(&fs::read_to_string(&path).unwrap());
        assert_eq!(doc.frontmatter.title(), Some("Optimizing ML Pipelines"));
        assert_eq!(doc.frontmatter.likes(), 0);

        assert!(create(&folio, ContentKind::Blog, "Optimizing ML Pipelines").is_err());
    }
}
