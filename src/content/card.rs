//! Summary cards shown in listings

use serde::Serialize;

/// A project in the projects listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// A post in the blog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub image: Option<String>,
    /// `likes` value from the front-matter, used to seed the counter
    pub initial_likes: u64,
    pub like_count: u64,
}

impl BlogCard {
    /// Date as displayed on the card
    pub fn display_date(&self) -> &str {
        self.date.as_deref().unwrap_or("No date")
    }
}
