//! Content loader - fetches configured documents and builds listing cards

use anyhow::Result;

use super::summary::excerpt;
use super::{BlogCard, ContentItem, ContentKind, Document, DocumentSource, ProjectCard};
use crate::config::SiteConfig;
use crate::likes::LikeStore;

/// Loads the statically configured projects and posts
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    source: &'a dyn DocumentSource,
}

impl<'a> ContentLoader<'a> {
    pub fn new(config: &'a SiteConfig, source: &'a dyn DocumentSource) -> Self {
        Self { config, source }
    }

    /// Fetch and parse one document
    pub async fn load_document(&self, kind: ContentKind, item: &ContentItem) -> Result<Document> {
        let path = kind.path_of(self.config, item);
        let raw = self.source.fetch(&path).await?;
        Ok(Document::parse(&raw))
    }

    /// Build project cards in configured order.
    /// Items that fail to load are logged and left out.
    pub async fn load_projects(&self) -> Vec<ProjectCard> {
        let mut cards = Vec::new();

        for item in &self.config.projects {
            match self.load_project(item).await {
                Ok(card) => cards.push(card),
                Err(e) => {
                    tracing::error!("Error loading project {}: {:#}", item.file, e);
                }
            }
        }

        tracing::debug!("Loaded {} of {} projects", cards.len(), self.config.projects.len());
        cards
    }

    async fn load_project(&self, item: &ContentItem) -> Result<ProjectCard> {
        let doc = self.load_document(ContentKind::Project, item).await?;
        let fm = &doc.frontmatter;

        Ok(ProjectCard {
            slug: item.slug.clone(),
            title: fm.title().unwrap_or("Untitled Project").to_string(),
            excerpt: excerpt(
                &doc.content,
                self.config.excerpt.project_length,
                &self.config.excerpt.omission,
            ),
            tags: fm.tags(),
        })
    }

    /// Build blog cards in configured order, each with its current like count.
    /// Items that fail to load are logged and left out.
    pub async fn load_blog_posts(&self, likes: &LikeStore) -> Vec<BlogCard> {
        let mut cards = Vec::new();

        for item in &self.config.blog {
            match self.load_blog_post(item, likes).await {
                Ok(card) => cards.push(card),
                Err(e) => {
                    tracing::error!("Error loading blog post {}: {:#}", item.file, e);
                }
            }
        }

        tracing::debug!("Loaded {} of {} blog posts", cards.len(), self.config.blog.len());
        cards
    }

    async fn load_blog_post(&self, item: &ContentItem, likes: &LikeStore) -> Result<BlogCard> {
        let doc = self.load_document(ContentKind::Blog, item).await?;
        let fm = &doc.frontmatter;

        let initial_likes = fm.likes();
        let like_count = likes.get_count(&item.slug, initial_likes).await;

        Ok(BlogCard {
            slug: item.slug.clone(),
            title: fm.title().unwrap_or("Untitled Post").to_string(),
            excerpt: excerpt(
                &doc.content,
                self.config.excerpt.blog_length,
                &self.config.excerpt.omission,
            ),
            tags: fm.tags(),
            date: fm.date().map(str::to_string),
            image: fm.image().map(str::to_string),
            initial_likes,
            like_count,
        })
    }
}
