//! Show a single blog post in the terminal

use anyhow::Result;

use crate::viewer::PostViewer;
use crate::Folio;

/// Open `slug`, print it, and optionally toggle its like before closing
pub async fn run(folio: &Folio, slug: &str, html: bool, like: bool) -> Result<()> {
    let source = folio.document_source();
    let renderer = folio.renderer();
    let likes = folio.like_store();
    let mut viewer = PostViewer::new(&folio.config, source.as_ref(), &renderer, &likes);

    let Some(view) = viewer.open(slug).await else {
        anyhow::bail!("Could not open post {:?}", slug);
    };

    println!("{}", view.title);
    let mut meta = Vec::new();
    if let Some(date) = &view.date {
        meta.push(date.clone());
    }
    meta.push(format!("{} min read", view.reading_time));
    if !view.tags.is_empty() {
        meta.push(
            view.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    println!("{}", meta.join(" · "));
    if let Some(image) = &view.image {
        println!("Image: {}", image);
    }
    println!();

    if html {
        println!("{}", view.html);
    } else {
        println!("{}", view.content.trim_end());
    }
    println!();

    let heart = if view.liked { "♥" } else { "♡" };
    println!("{} {}", heart, view.like_count);

    if like {
        if let Some(state) = viewer.toggle_like().await {
            let heart = if state.liked { "♥" } else { "♡" };
            println!("{} {} (toggled)", heart, state.count);
        }
    }

    viewer.close();
    Ok(())
}
