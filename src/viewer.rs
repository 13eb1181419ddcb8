//! Single-post viewer
//!
//! Opening a post creates a [`PostSession`]; like toggles act on the
//! session's post until it is closed.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::summary::reading_time;
use crate::content::{ContentKind, ContentLoader, DocumentSource, MarkdownRenderer};
use crate::likes::{LikeState, LikeStore};

/// A fully rendered post with its like state
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    /// Minutes, rounded up
    pub reading_time: usize,
    /// Markdown body
    pub content: String,
    pub html: String,
    /// `likes` front-matter value, the fallback for count lookups
    pub initial_likes: u64,
    pub like_count: u64,
    pub liked: bool,
}

/// The post currently on display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSession {
    pub slug: String,
}

pub struct PostViewer<'a> {
    config: &'a SiteConfig,
    source: &'a dyn DocumentSource,
    renderer: &'a MarkdownRenderer,
    likes: &'a LikeStore,
    session: Option<PostSession>,
}

impl<'a> PostViewer<'a> {
    pub fn new(
        config: &'a SiteConfig,
        source: &'a dyn DocumentSource,
        renderer: &'a MarkdownRenderer,
        likes: &'a LikeStore,
    ) -> Self {
        Self {
            config,
            source,
            renderer,
            likes,
            session: None,
        }
    }

    /// Open the blog post `slug`.
    ///
    /// Returns `None` for an unknown slug or when the post cannot be fetched
    /// (logged); the current session is left untouched in that case.
    pub async fn open(&mut self, slug: &str) -> Option<PostView> {
        match self.render(slug).await {
            Ok(view) => {
                self.session = Some(PostSession {
                    slug: view.slug.clone(),
                });
                Some(view)
            }
            Err(e) => {
                tracing::error!("Error opening blog post {}: {:#}", slug, e);
                None
            }
        }
    }

    async fn render(&self, slug: &str) -> Result<PostView> {
        let item = self
            .config
            .blog_item(slug)
            .ok_or_else(|| anyhow!("no blog post with slug {:?}", slug))?;

        let loader = ContentLoader::new(self.config, self.source);
        let doc = loader.load_document(ContentKind::Blog, item).await?;
        let fm = &doc.frontmatter;

        let html = self.renderer.render(&doc.content)?;
        let initial_likes = fm.likes();
        let like_count = self.likes.get_count(&item.slug, initial_likes).await;
        let liked = self.likes.get_liked(&item.slug);

        Ok(PostView {
            slug: item.slug.clone(),
            title: fm.title().unwrap_or("Untitled").to_string(),
            date: fm.date().map(str::to_string),
            tags: fm.tags(),
            image: fm.image().map(str::to_string),
            reading_time: reading_time(&doc.content, self.config.reading.words_per_minute),
            content: doc.content,
            html,
            initial_likes,
            like_count,
            liked,
        })
    }

    pub fn session(&self) -> Option<&PostSession> {
        self.session.as_ref()
    }

    /// Toggle the like on the open post; `None` when no post is open
    pub async fn toggle_like(&self) -> Option<LikeState> {
        let session = self.session.as_ref()?;
        Some(self.likes.toggle(&session.slug).await)
    }

    /// Close the open post
    pub fn close(&mut self) -> Option<PostSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, FileSource};
    use crate::likes::{CounterStore, MemoryCounterStore, MemoryStorage};
    use std::sync::Arc;

    fn fixture() -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("content/blog")).unwrap();

        let body = vec!["word"; 401].join(" ");
        std::fs::write(
            dir.path().join("content/blog/post.md"),
            format!("---\ntitle: Post\ntags: [a]\nlikes: 2\n---\n# Intro\n\n{}", body),
        )
        .unwrap();

        let mut config = SiteConfig::default();
        config.blog = vec![
            ContentItem::new("post.md", "post"),
            ContentItem::new("gone.md", "gone"),
        ];
        (dir, config)
    }

    #[tokio::test]
    async fn test_open_toggle_close() {
        let (dir, config) = fixture();
        let source = FileSource::new(dir.path());
        let renderer = MarkdownRenderer::new();
        let remote = Arc::new(MemoryCounterStore::new());
        let likes = LikeStore::new(
            Some(remote.clone()),
            Arc::new(MemoryStorage::new()),
            "blog-likes",
        );

        let mut viewer = PostViewer::new(&config, &source, &renderer, &likes);
        assert!(viewer.toggle_like().await.is_none());

        let view = viewer.open("post").await.unwrap();
        assert_eq!(view.title, "Post");
        assert_eq!(view.tags, vec!["a"]);
        // "#", "Intro" and 401 words
        assert_eq!(view.reading_time, 3);
        assert!(view.html.contains("<h1>Intro</h1>"));
        assert_eq!(view.initial_likes, 2);
        assert_eq!(view.like_count, 2);
        assert!(!view.liked);
        assert_eq!(viewer.session().map(|s| s.slug.as_str()), Some("post"));

        let state = viewer.toggle_like().await.unwrap();
        assert_eq!(state, LikeState { count: 3, liked: true });
        assert_eq!(
            remote.read("blog-likes/post/count").await.unwrap(),
            Some(3)
        );

        assert_eq!(viewer.close(), Some(PostSession { slug: "post".into() }));
        assert!(viewer.session().is_none());
        assert!(viewer.toggle_like().await.is_none());
    }

    #[tokio::test]
    async fn test_open_unknown_or_missing() {
        let (dir, config) = fixture();
        let source = FileSource::new(dir.path());
        let renderer = MarkdownRenderer::new();
        let likes = LikeStore::unconfigured(Arc::new(MemoryStorage::new()));

        let mut viewer = PostViewer::new(&config, &source, &renderer, &likes);
        assert!(viewer.open("nope").await.is_none());
        assert!(viewer.open("gone").await.is_none());
        assert!(viewer.session().is_none());
    }
}
