//! Front-matter parsing
//!
//! Documents may start with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Building an AutoML Framework
//! tags: [ml, "python"]
//! likes: 12
//! ---
//! Body text
//! ```
//!
//! Header lines are flat `key: value` pairs. A value wrapped in square
//! brackets is a comma-separated list. Anything that does not match the
//! block pattern is treated as body text.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref FRONT_MATTER_BLOCK: Regex =
        Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").expect("valid front-matter pattern");
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Text(String),
    List(Vec<String>),
}

impl FrontMatterValue {
    /// The value as a string, if it is not a list
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontMatterValue::Text(s) => Some(s),
            FrontMatterValue::List(_) => None,
        }
    }
}

/// Front-matter header of a document (keys keep their source order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.get(key)
    }

    /// Get a plain string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontMatterValue::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontMatterValue)> {
        self.fields.iter()
    }

    pub fn title(&self) -> Option<&str> {
        self.non_empty("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.non_empty("date")
    }

    pub fn image(&self) -> Option<&str> {
        self.non_empty("image")
    }

    /// Tags as a list, without empty entries. A plain string value counts as
    /// a single tag.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(FrontMatterValue::List(tags)) => {
                tags.iter().filter(|t| !t.is_empty()).cloned().collect()
            }
            Some(FrontMatterValue::Text(tag)) if !tag.is_empty() => vec![tag.clone()],
            _ => Vec::new(),
        }
    }

    /// Initial like count from the `likes` field.
    ///
    /// Reads the leading digits only, so `"12 likes"` gives 12. Missing,
    /// negative or non-numeric values give 0.
    pub fn likes(&self) -> u64 {
        self.get_str("likes").map(parse_leading_int).unwrap_or(0)
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }
}

/// A parsed document: header plus body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub frontmatter: FrontMatter,
    pub content: String,
}

impl Document {
    /// Parse a raw document. Never fails: input without a well-formed header
    /// block comes back as an empty header and the whole input as content.
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = FRONT_MATTER_BLOCK.captures(raw) else {
            return Self {
                frontmatter: FrontMatter::default(),
                content: raw.to_string(),
            };
        };

        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        Self {
            frontmatter: parse_header(header),
            content: body.to_string(),
        }
    }
}

/// Parse the lines between the delimiters
fn parse_header(header: &str) -> FrontMatter {
    let mut frontmatter = FrontMatter::default();

    for line in header.split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        frontmatter.insert(key, parse_value(value.trim()));
    }

    frontmatter
}

fn parse_value(value: &str) -> FrontMatterValue {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        let items = inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect();
        return FrontMatterValue::List(items);
    }

    FrontMatterValue::Text(strip_quotes(value).to_string())
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

/// `parseInt`-style parse: optional sign, then leading ASCII digits
fn parse_leading_int(s: &str) -> u64 {
    let s = s.trim_start();
    if s.starts_with('-') {
        return 0;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_tags() {
        let doc = Document::parse("---\ntitle: Hi\ntags: [a, b]\n---\nBody text");
        assert_eq!(doc.frontmatter.get_str("title"), Some("Hi"));
        assert_eq!(
            doc.frontmatter.get("tags"),
            Some(&FrontMatterValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(doc.frontmatter.len(), 2);
        assert_eq!(doc.content, "Body text");
    }

    #[test]
    fn test_no_frontmatter_returns_input() {
        let inputs = [
            "",
            "Just a body",
            "# Heading\n\n---\n\nMore",
            "---\ntitle: unterminated\nbody",
            "---\n---\nno header lines",
            "\n---\ntitle: leading newline\n---\nbody",
            "---\ntitle: no newline after close\n---",
        ];
        for input in inputs {
            let doc = Document::parse(input);
            assert!(doc.frontmatter.is_empty(), "header for {:?}", input);
            assert_eq!(doc.content, input);
        }
    }

    #[test]
    fn test_empty_header_block() {
        let doc = Document::parse("---\n\n---\nBody");
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.content, "Body");
    }

    #[test]
    fn test_quotes_and_colons() {
        let doc = Document::parse(
            "---\ntitle: \"Rust: the good parts\"\nimage: 'https://example.com/a.png'\n---\n",
        );
        assert_eq!(doc.frontmatter.title(), Some("Rust: the good parts"));
        assert_eq!(doc.frontmatter.image(), Some("https://example.com/a.png"));
        assert_eq!(doc.content, "");
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let doc = Document::parse("---\njust words\ndate: 2024-03-01\n: orphan\n---\nx");
        assert_eq!(doc.frontmatter.len(), 1);
        assert_eq!(doc.frontmatter.date(), Some("2024-03-01"));
    }

    #[test]
    fn test_list_elements_are_unquoted() {
        let doc = Document::parse("---\ntags: [ 'ml', \"rag\" , llm ]\n---\n");
        assert_eq!(doc.frontmatter.tags(), vec!["ml", "rag", "llm"]);
    }

    #[test]
    fn test_empty_list() {
        let doc = Document::parse("---\ntags: []\nkeywords: [ ]\n---\n");
        assert_eq!(
            doc.frontmatter.get("tags"),
            Some(&FrontMatterValue::List(vec![String::new()]))
        );
        assert_eq!(
            doc.frontmatter.get("keywords"),
            Some(&FrontMatterValue::List(vec![String::new()]))
        );
        assert!(doc.frontmatter.tags().is_empty());
    }

    #[test]
    fn test_tags_skip_empty_entries() {
        let doc = Document::parse("---\ntags: [a, , b,]\n---\n");
        assert_eq!(
            doc.frontmatter.get("tags"),
            Some(&FrontMatterValue::List(vec![
                "a".to_string(),
                String::new(),
                "b".to_string(),
                String::new()
            ]))
        );
        assert_eq!(doc.frontmatter.tags(), vec!["a", "b"]);
    }

    #[test]
    fn test_single_string_tag() {
        let doc = Document::parse("---\ntags: notes\n---\n");
        assert_eq!(doc.frontmatter.tags(), vec!["notes"]);
    }

    #[test]
    fn test_body_keeps_later_delimiters() {
        let doc = Document::parse("---\ntitle: A\n---\nfirst\n---\nsecond\n");
        assert_eq!(doc.frontmatter.title(), Some("A"));
        assert_eq!(doc.content, "first\n---\nsecond\n");
    }

    #[test]
    fn test_likes() {
        let likes = |raw: &str| Document::parse(raw).frontmatter.likes();
        assert_eq!(likes("---\nlikes: 42\n---\n"), 42);
        assert_eq!(likes("---\nlikes: '7'\n---\n"), 7);
        assert_eq!(likes("---\nlikes: 12 likes\n---\n"), 12);
        assert_eq!(likes("---\nlikes: -3\n---\n"), 0);
        assert_eq!(likes("---\nlikes: many\n---\n"), 0);
        assert_eq!(likes("---\ntitle: none\n---\n"), 0);
    }

    #[test]
    fn test_keys_keep_order() {
        let doc = Document::parse("---\nb: 1\na: 2\nc: 3\n---\n");
        let keys: Vec<_> = doc.frontmatter.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
