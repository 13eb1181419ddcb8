//! Like or unlike a blog post from the terminal

use anyhow::Result;

use crate::content::{ContentKind, ContentLoader};
use crate::Folio;

/// Toggle the like on `slug`, or only print its state with `status_only`
pub async fn run(folio: &Folio, slug: &str, status_only: bool) -> Result<()> {
    let Some(item) = folio.config.blog_item(slug) else {
        anyhow::bail!("Unknown post: {}", slug);
    };
    let likes = folio.like_store();

    if status_only {
        // Seed with the front-matter count like the listing does
        let source = folio.document_source();
        let loader = ContentLoader::new(&folio.config, source.as_ref());
        let fallback = match loader.load_document(ContentKind::Blog, item).await {
            Ok(doc) => doc.frontmatter.likes(),
            Err(e) => {
                tracing::warn!("Could not read {}: {:#}", item.file, e);
                0
            }
        };

        let count = likes.get_count(slug, fallback).await;
        let heart = if likes.get_liked(slug) { "♥" } else { "♡" };
        println!("{} {} {}", heart, count, slug);
        return Ok(());
    }

    let state = likes.toggle(slug).await;
    if state.liked {
        println!("♥ Liked {} ({} likes)", slug, state.count);
    } else {
        println!("♡ Unliked {} ({} likes)", slug, state.count);
    }
    if !likes.is_configured() {
        println!("No like database configured; the count was not saved.");
    }

    Ok(())
}
