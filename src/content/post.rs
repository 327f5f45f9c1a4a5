//! Post model and derived fields

use pulldown_cmark::{Event, Parser};
use serde::{Deserialize, Serialize};

use super::frontmatter::PostFrontMatter;

/// A blog post, standalone or belonging to a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, derived from the filename (minus extension)
    pub slug: String,

    /// Post title
    pub title: String,

    /// ISO date string (`YYYY-MM-DD`), ordered lexicographically
    pub date: String,

    /// Short description
    pub description: Option<String>,

    /// Tags in declaration order
    pub tags: Vec<String>,

    /// Category name
    pub category: Option<String>,

    /// Whether the post is featured on the front page
    pub featured: bool,

    /// Drafts are excluded from every public listing
    pub draft: bool,

    /// Estimated reading time in minutes, derived from the body
    pub reading_time: u32,

    /// Slug of the owning module; `None` for standalone posts
    pub module: Option<String>,

    /// Raw markdown body, after the front-matter block
    pub content: String,
}

impl Post {
    /// Build a post from parsed front-matter, applying every field default
    /// in one place.
    pub fn from_front_matter(
        slug: &str,
        module: Option<&str>,
        fm: PostFrontMatter,
        body: &str,
        words_per_minute: u32,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            description: fm.description,
            tags: fm.tags,
            category: fm.category,
            featured: fm.featured,
            draft: fm.draft,
            reading_time: reading_time(body, words_per_minute),
            module: module.map(|m| m.to_string()),
            content: body.to_string(),
        }
    }
}

/// Estimated reading time in whole minutes, rounded up
pub fn reading_time(markdown: &str, words_per_minute: u32) -> u32 {
    let words = count_words(markdown) as u32;
    words.div_ceil(words_per_minute.max(1))
}

/// Count words in a markdown body, looking at text content only
pub fn count_words(markdown: &str) -> usize {
    let mut count = 0;
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => count += count_text_words(&text),
            _ => {}
        }
    }
    count
}

/// Count CJK characters and ASCII words in plain text
fn count_text_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if c > '\u{4E00}' && c < '\u{9FFF}' {
            // Chinese characters
            count += 1;
            in_word = false;
        } else {
            in_word = false;
        }
    }

    count
}
