//! List site content

use anyhow::Result;

use crate::content::ContentLoader;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let source = folio.document_source();
    let loader = ContentLoader::new(&folio.config, source.as_ref());

    match content_type {
        "project" | "projects" => {
            let projects = loader.load_projects().await;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!("  {} [{}]", project.title, project.slug);
            }
        }
        "post" | "posts" | "blog" => {
            let likes = folio.like_store();
            let posts = loader.load_blog_posts(&likes).await;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let liked = if likes.get_liked(&post.slug) { " ♥" } else { "" };
                println!(
                    "  {} - {} [{}] {} likes{}",
                    post.display_date(),
                    post.title,
                    post.slug,
                    post.like_count,
                    liked
                );
            }
        }
        "tag" | "tags" => {
            let likes = folio.like_store();
            let projects = loader.load_projects().await;
            let posts = loader.load_blog_posts(&likes).await;

            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            let all_tags = projects
                .into_iter()
                .flat_map(|p| p.tags)
                .chain(posts.into_iter().flat_map(|p| p.tags));
            for tag in all_tags {
                *tags.entry(tag).or_insert(0) += 1;
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: project, post, tag",
                content_type
            );
        }
    }

    Ok(())
}
