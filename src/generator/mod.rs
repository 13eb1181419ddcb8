//! Generator module - writes the static site into the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{BlogCard, ContentLoader, DocumentSource, MarkdownRenderer, ProjectCard};
use crate::helpers::{blog_card, html_escape, layout, post_article, project_card};
use crate::likes::LikeStore;
use crate::viewer::PostViewer;
use crate::Folio;

/// Stylesheet written when the site does not ship its own `css/style.css`
const DEFAULT_STYLE: &str = r#":root { --text: #1f2933; --muted: #616e7c; --border: #e4e7eb; --accent: #e0245e; }
body { font-family: system-ui, sans-serif; color: var(--text); margin: 0; line-height: 1.6; }
.container { max-width: 960px; margin: 0 auto; padding: 0 1rem; }
nav .container { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--border); }
nav ul { display: flex; gap: 1rem; list-style: none; }
.project-card, .blog-card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.blog-image, .post-featured-image { max-width: 100%; border-radius: 6px; }
.tech-tag { display: inline-block; margin-right: .5rem; color: var(--muted); font-size: .9rem; }
.blog-date, .post-meta { color: var(--muted); font-size: .9rem; }
.post-meta span + span::before { content: " · "; }
.like-button { background: none; border: 1px solid var(--border); border-radius: 999px; cursor: pointer; padding: .2rem .8rem; }
.like-button.liked .heart-icon { color: var(--accent); }
"#;

/// What a build produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub projects: usize,
    pub posts: usize,
    pub files_copied: usize,
}

/// Static site generator
pub struct Generator<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            folio,
            renderer: folio.renderer(),
        }
    }

    /// Generate the entire site
    pub async fn generate(
        &self,
        source: &dyn DocumentSource,
        likes: &LikeStore,
    ) -> Result<BuildSummary> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let mut summary = BuildSummary::default();

        // Documents stay fetchable from the published site
        summary.files_copied += copy_dir(
            &self.folio.content_dir,
            &public_dir.join(&self.folio.config.content_dir),
        )?;
        summary.files_copied += copy_dir(&self.folio.static_dir, public_dir)?;
        self.write_default_style()?;

        let config = &self.folio.config;
        let loader = ContentLoader::new(config, source);
        let projects = loader.load_projects().await;
        let posts = loader.load_blog_posts(likes).await;
        summary.projects = projects.len();

        self.generate_index(&projects, &posts)?;

        let mut viewer = PostViewer::new(config, source, &self.renderer, likes);
        for card in &posts {
            let Some(view) = viewer.open(&card.slug).await else {
                continue;
            };
            let html = layout(config, &view.title, &post_article(&view));
            self.write_page(&Path::new("blog").join(&view.slug).join("index.html"), &html)?;
            viewer.close();
            summary.posts += 1;
        }

        tracing::info!(
            "Generated {} project cards and {} posts ({} files copied)",
            summary.projects,
            summary.posts,
            summary.files_copied
        );

        Ok(summary)
    }

    fn generate_index(&self, projects: &[ProjectCard], posts: &[BlogCard]) -> Result<()> {
        let config = &self.folio.config;

        let project_cards: String = projects.iter().map(project_card).collect();
        let blog_cards: String = posts.iter().map(blog_card).collect();

        let body = format!(
            r#"<section class="hero"><h1>{title}</h1><p>{description}</p></section>
<section id="projects"><h2>Projects</h2><div id="projects-container">{projects}</div></section>
<section id="blog"><h2>Blog</h2><div id="blog-container">{posts}</div></section>
<section id="contact"><h2>Contact</h2>
<form id="contact-form" method="post" action="/api/contact">
  <input name="name" placeholder="Name" required>
  <input name="email" type="email" placeholder="Email" required>
  <textarea name="message" placeholder="Message" required></textarea>
  <button type="submit">Send</button>
</form>
<p class="contact-email">{email}</p>
</section>"#,
            title = html_escape(&config.title),
            description = html_escape(&config.description),
            projects = project_cards,
            posts = blog_cards,
            email = html_escape(&config.contact.email),
        );

        self.write_page(Path::new("index.html"), &layout(config, &config.title, &body))
    }

    fn write_default_style(&self) -> Result<()> {
        let path = self.folio.public_dir.join("css/style.css");
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_STYLE)?;
        Ok(())
    }

    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated {:?}", output_path);
        Ok(())
    }
}

/// Copy every file under `from` into `to`, keeping relative paths.
/// A missing source directory copies nothing.
fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(from)?;
        let dest = to.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
        copied += 1;
    }

    Ok(copied)
}
