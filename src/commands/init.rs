//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_content = r#"# Portfolio configuration

# Site
title: My Portfolio
description: Projects and writing
author: John Doe
language: en

# URL
url: http://localhost:4000
# Fetch documents over HTTP instead of reading them from disk
# source_url: https://example.com

# Directory
content_dir: content
projects_dir: content/projects/
blog_dir: content/blog/
static_dir: static
public_dir: public

# Content (listed in display order)
projects:
  - file: hello-project.md
    slug: hello-project

blog:
  - file: hello-world.md
    slug: hello-world

excerpt:
  project_length: 200
  blog_length: 150

reading:
  words_per_minute: 200

highlight_theme: base16-ocean.dark

# Like counters (real-time database REST endpoint)
likes:
  # database_url: https://your-project-default-rtdb.firebaseio.com
  namespace: blog-likes
  local_storage: .folio/local_storage.json

contact:
  email: you@example.com
"#;

    fs::write(&config_path, config_content)?;

    let project = r#"---
title: Hello Project
tags: [rust, web]
---
A short description of **what** this project does and why it matters.
"#;

    let now = chrono::Local::now();
    let post = format!(
        r#"---
title: Hello World
date: {}
tags: [intro]
likes: 0
---
# Welcome

This is your first post. Edit `content/blog/hello-world.md` and run
`folio build` to regenerate the site, or `folio server` to preview it with
live reload and working like buttons.
"#,
        now.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("content/projects/hello-project.md"), project)?;
    fs::write(target_dir.join("content/blog/hello-world.md"), post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");
        assert_eq!(folio.config.blog[0].slug, "hello-world");
        assert!(folio.content_dir.join("blog/hello-world.md").exists());

        assert!(init_site(dir.path()).is_err());
    }
}
