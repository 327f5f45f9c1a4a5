//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// How a slug that exists both as a module post and as a standalone post
/// resolves in `find_post_by_slug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SlugPrecedence {
    /// The module post shadows the standalone post.
    #[default]
    ModuleWins,
    /// The standalone post shadows the module post.
    StandaloneWins,
    /// Both existing is an error surfaced to the caller.
    ErrorOnCollision,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,

    // Directory
    pub source_dir: String,
    pub posts_dir: String,
    pub modules_dir: String,

    // Writing
    pub new_post_name: String,
    pub include_drafts: bool,

    // Reading
    pub words_per_minute: u32,
    pub featured_count: usize,

    // Lookup
    pub slug_precedence: SlugPrecedence,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quill".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            url: "http://example.com".to_string(),

            source_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            modules_dir: "modules".to_string(),

            new_post_name: ":title.md".to_string(),
            include_drafts: false,

            words_per_minute: 200,
            featured_count: 3,

            slug_precedence: SlugPrecedence::ModuleWins,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
