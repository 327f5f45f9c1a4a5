//! Front-matter parsing

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a post file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFrontMatter {
    pub title: Option<String>,
    /// ISO date string (`YYYY-MM-DD`); compared lexicographically, never
    /// parsed into a calendar date.
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub draft: bool,
    /// Informational only; authoritative module membership is directory
    /// placement.
    pub module: Option<String>,
}

/// Front-matter of a module's `metadata.md` descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
    #[serde(rename = "postOrder", deserialize_with = "string_or_vec", default)]
    pub post_order: Vec<String>,
}

/// Parse front-matter from a content string.
/// Returns (front_matter, remaining_content).
///
/// Missing, empty, unterminated, or malformed front-matter is never an
/// error; the caller gets defaults and the original content back.
pub fn parse<T>(content: &str) -> (T, &str)
where
    T: DeserializeOwned + Default,
{
    let Some((yaml, body)) = split(content) else {
        return (T::default(), content);
    };

    if yaml.trim().is_empty() {
        return (T::default(), body);
    }

    match serde_yaml::from_str::<T>(yaml) {
        Ok(fm) => (fm, body),
        Err(e) => {
            tracing::warn!("Failed to parse YAML front-matter, treating as content: {}", e);
            (T::default(), content)
        }
    }
}

/// Split a leading `---` delimited YAML block from the body.
fn split(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start();
    let rest = trimmed.strip_prefix("---")?;
    let rest = rest.trim_start_matches(['\n', '\r']);

    let end_pos = rest.find("\n---")?;
    let yaml = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    Some((yaml, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags:
  - rust
  - blog
featured: true
---

This is the content.
"#;

        let (fm, remaining) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-01-15".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert!(fm.featured);
        assert!(!fm.draft);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_module_frontmatter() {
        let content = r#"---
title: Rust Basics
description: A short course
order: 2
postOrder:
  - intro
  - setup
---
"#;

        let (fm, _) = parse::<ModuleFrontMatter>(content);
        assert_eq!(fm.title, Some("Rust Basics".to_string()));
        assert_eq!(fm.order, Some(2));
        assert_eq!(fm.post_order, vec!["intro", "setup"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some markdown.\n\nNo metadata here.";
        let (fm, remaining) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Oops\nno closing delimiter";
        let (fm, remaining) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_yaml_falls_back_to_defaults() {
        let content = "---\ntitle: [unclosed\n---\n\nBody text.\n";
        let (fm, remaining) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Body text."));
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let content = "---\n---\n\nBody only.\n";
        let (fm, remaining) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Body only."));
    }

    #[test]
    fn test_single_string_tags() {
        let content = r#"---
title: Single Tag Post
tags: notes
---

Content here.
"#;

        let (fm, _) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let content = r#"---
title: Post
layout: fancy
comments: true
---
Body.
"#;

        let (fm, _) = parse::<PostFrontMatter>(content);
        assert_eq!(fm.title, Some("Post".to_string()));
    }
}
