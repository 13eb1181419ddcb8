//! Content module - documents, parsing, listing cards and rendering

mod card;
mod frontmatter;
mod item;
pub mod loader;
mod markdown;
mod source;
pub mod summary;

pub use card::{BlogCard, ProjectCard};
pub use frontmatter::{Document, FrontMatter, FrontMatterValue};
pub use item::{ContentItem, ContentKind};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use source::{DocumentSource, FileSource, HttpSource};
