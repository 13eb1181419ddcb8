//! HTML helper functions

use crate::config::SiteConfig;
use crate::content::{BlogCard, ProjectCard};
use crate::viewer::PostView;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Tag chips (`#tag`), empty string for no tags
pub fn tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="tech-tag">#{}</span>"#, html_escape(tag)))
        .collect()
}

/// Like button wired to the dev server's like endpoints.
///
/// `count` and `liked` are the build-time state; `fallback` is the
/// front-matter count sent along when the page refreshes the count.
pub fn like_button(slug: &str, count: u64, liked: bool, fallback: u64) -> String {
    let class = if liked {
        "like-button liked"
    } else {
        "like-button"
    };
    format!(
        r#"<button class="{}" data-slug="{}" data-fallback="{}"><span class="heart-icon">♥</span><span class="like-count">{}</span></button>"#,
        class,
        html_escape(slug),
        fallback,
        count
    )
}

/// Project card markup
pub fn project_card(card: &ProjectCard) -> String {
    format!(
        r#"<div class="project-card">
  <h3 class="project-title">{}</h3>
  <p class="project-description">{}</p>
  <div class="project-tech">{}</div>
</div>"#,
        html_escape(&card.title),
        html_escape(&card.excerpt),
        tag_list(&card.tags)
    )
}

/// Blog card markup
pub fn blog_card(card: &BlogCard) -> String {
    let image = card
        .image
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" class="blog-image">"#,
                html_escape(src),
                html_escape(&card.title)
            )
        })
        .unwrap_or_default();

    let tags = if card.tags.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="blog-tags">{}</div>"#, tag_list(&card.tags))
    };

    let href = post_path(&card.slug);

    format!(
        r#"<div class="blog-card">
  {image}
  <div class="blog-content">
    <div class="blog-date">{date}</div>
    <h3 class="blog-title"><a href="{href}">{title}</a></h3>
    {tags}
    <p class="blog-excerpt">{excerpt}</p>
    <div class="blog-meta">
      <a href="{href}" class="read-more">Read more →</a>
      {button}
    </div>
  </div>
</div>"#,
        image = image,
        date = html_escape(card.display_date()),
        href = href,
        title = html_escape(&card.title),
        tags = tags,
        excerpt = html_escape(&card.excerpt),
        button = like_button(&card.slug, card.like_count, false, card.initial_likes),
    )
}

/// Body of a single post page. The rendered markdown goes in unescaped.
pub fn post_article(view: &PostView) -> String {
    let image = view
        .image
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" class="post-featured-image">"#,
                html_escape(src),
                html_escape(&view.title)
            )
        })
        .unwrap_or_default();

    let tags = if view.tags.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="post-tags">{}</div>"#, tag_list(&view.tags))
    };

    format!(
        r#"<article class="blog-post" data-slug="{slug}">
  <a href="/" class="back-link">← Back</a>
  <h1 class="post-title">{title}</h1>
  <div class="post-meta">
    <span class="post-date">{date}</span>
    <span class="post-reading-time">{minutes} min read</span>
  </div>
  {tags}
  {image}
  <div class="post-content">{html}</div>
  {button}
</article>"#,
        slug = html_escape(&view.slug),
        title = html_escape(&view.title),
        date = html_escape(view.date.as_deref().unwrap_or("")),
        minutes = view.reading_time,
        tags = tags,
        image = image,
        html = view.html,
        button = like_button(&view.slug, view.like_count, view.liked, view.initial_likes),
    )
}

/// URL path of a post page
pub fn post_path(slug: &str) -> String {
    format!("/blog/{}/", html_escape(slug))
}

/// Script that refreshes like buttons from `/api/likes/:slug` on load and
/// sends clicks to `/api/likes/:slug/toggle`. Without `folio server` the
/// requests fail and the build-time counts stay.
const LIKE_SCRIPT: &str = r#"<script>
function likeUrl(button) {
  return '/api/likes/' + encodeURIComponent(button.dataset.slug);
}
function showLike(button, state) {
  button.querySelector('.like-count').textContent = state.count;
  button.classList.toggle('liked', state.liked);
}
document.addEventListener('DOMContentLoaded', function () {
  document.querySelectorAll('.like-button').forEach(function (button) {
    fetch(likeUrl(button) + '?fallback=' + encodeURIComponent(button.dataset.fallback || '0'))
      .then(function (r) { if (!r.ok) throw new Error(r.status); return r.json(); })
      .then(function (state) { showLike(button, state); })
      .catch(function (err) { console.error('Error getting like count:', err); });
  });
});
document.addEventListener('click', function (e) {
  var button = e.target.closest('.like-button');
  if (!button) return;
  e.preventDefault();
  fetch(likeUrl(button) + '/toggle', { method: 'POST' })
    .then(function (r) { if (!r.ok) throw new Error(r.status); return r.json(); })
    .then(function (state) { showLike(button, state); })
    .catch(function (err) { console.error('Error toggling like:', err); });
});
</script>"#;

/// Wrap page content in the site layout
pub fn layout(config: &SiteConfig, page_title: &str, body: &str) -> String {
    let full_title = if page_title.is_empty() || page_title == config.title {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(page_title), html_escape(&config.title))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<meta name="generator" content="folio-rs {version}">
<title>{title}</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<nav><div class="container"><a href="/" class="logo">{site}</a>
<ul><li><a href="/#projects">Projects</a></li><li><a href="/#blog">Blog</a></li><li><a href="/#contact">Contact</a></li></ul></div></nav>
<main class="container">
{body}
</main>
<footer><p>© {author}</p></footer>
{script}
</body>
</html>
"#,
        lang = html_escape(&config.language),
        description = html_escape(&config.description),
        version = env!("CARGO_PKG_VERSION"),
        title = full_title,
        site = html_escape(&config.title),
        body = body,
        author = html_escape(&config.author),
        script = LIKE_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_tag_list() {
        assert_eq!(tag_list(&[]), "");
        assert_eq!(
            tag_list(&["rust".to_string(), "<ml>".to_string()]),
            r#"<span class="tech-tag">#rust</span><span class="tech-tag">#&lt;ml&gt;</span>"#
        );
    }

    #[test]
    fn test_like_button() {
        let html = like_button("post", 4, true, 3);
        assert!(html.contains(r#"class="like-button liked""#));
        assert!(html.contains(r#"data-slug="post""#));
        assert!(html.contains(r#"data-fallback="3""#));
        assert!(html.contains(">4<"));
    }

    #[test]
    fn test_blog_card_escapes_frontmatter() {
        let card = BlogCard {
            slug: "a".into(),
            title: "<b>Title</b>".into(),
            excerpt: "x...".into(),
            tags: vec![],
            date: None,
            image: None,
            initial_likes: 0,
            like_count: 2,
        };
        let html = blog_card(&card);
        assert!(html.contains("&lt;b&gt;Title&lt;/b&gt;"));
        assert!(html.contains("No date"));
        assert!(!html.contains("blog-tags"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_post_article_keeps_rendered_html() {
        let view = PostView {
            slug: "p".into(),
            title: "P".into(),
            date: Some("2024-01-01".into()),
            tags: vec!["t".into()],
            image: None,
            reading_time: 2,
            content: "body".into(),
            html: "<p>body</p>".into(),
            initial_likes: 1,
            like_count: 1,
            liked: false,
        };
        let html = post_article(&view);
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("2 min read"));
        assert!(html.contains("#t"));
        assert!(html.contains(r#"data-fallback="1""#));
    }

    #[test]
    fn test_layout_refreshes_like_counts() {
        let html = layout(&SiteConfig::default(), "Post", "<p>x</p>");
        assert!(html.contains("DOMContentLoaded"));
        assert!(html.contains("'?fallback='"));
        assert!(html.contains("'/toggle'"));
    }
}
