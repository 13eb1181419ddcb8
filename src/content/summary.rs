//! Excerpts and reading time

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Characters dropped from excerpts (heading, emphasis and code markers)
const MARKDOWN_MARKERS: [char; 3] = ['#', '*', '`'];

/// Plain-text preview of a body.
///
/// Takes the first `length` characters, removes markdown markers and always
/// appends `omission`.
pub fn excerpt(content: &str, length: usize, omission: &str) -> String {
    let mut result: String = content
        .chars()
        .take(length)
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .collect();
    result.push_str(omission);
    result
}

/// Number of pieces left after splitting on whitespace runs.
///
/// Leading and trailing runs each add an empty piece and an empty body counts
/// as one, so every post reads for at least a minute.
pub fn word_count(content: &str) -> usize {
    WHITESPACE_RUN.split(content).count()
}

/// Reading time in whole minutes, rounded up
pub fn reading_time(content: &str, words_per_minute: usize) -> usize {
    word_count(content).div_ceil(words_per_minute.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(&words(400), 200), 2);
        assert_eq!(reading_time(&words(201), 200), 2);
        assert_eq!(reading_time(&words(200), 200), 1);
        assert_eq!(reading_time(&words(1), 200), 1);
        assert_eq!(reading_time("", 200), 1);
    }

    #[test]
    fn test_reading_time_counts_edge_whitespace() {
        // A body between the header and a final newline
        assert_eq!(reading_time(&format!("\n{}\n", words(200)), 200), 2);
        assert_eq!(reading_time(&format!("{}\n", words(199)), 200), 1);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("one\n\ttwo   three"), 3);
        assert_eq!(word_count("  one\n\ttwo   three \n"), 5);
        assert_eq!(word_count(""), 1);
        assert_eq!(word_count("\n"), 2);
    }

    #[test]
    fn test_excerpt_strips_markers() {
        assert_eq!(
            excerpt("# Title\n**bold** and `code`", 200, "..."),
            " Title\nbold and code..."
        );
    }

    #[test]
    fn test_excerpt_truncates_before_stripping() {
        assert_eq!(excerpt("## abcdef", 5, "..."), " ab...");
        assert_eq!(excerpt("short", 150, "..."), "short...");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        assert_eq!(excerpt("héllo wörld", 4, "…"), "héll…");
    }
}
