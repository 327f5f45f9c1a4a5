//! Standalone post loading from the flat posts directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{frontmatter, Post};
use crate::config::SiteConfig;
use crate::Quill;

/// Probe order for slug lookups: `.md` wins over `.mdx`
pub(crate) const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Loads standalone posts (files directly in the posts directory)
pub struct PostLoader<'a> {
    quill: &'a Quill,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(quill: &'a Quill) -> Self {
        Self { quill }
    }

    fn posts_dir(&self) -> PathBuf {
        self.quill.source_dir.join(&self.quill.config.posts_dir)
    }

    /// Load all standalone posts, unordered. Drafts are filtered out
    /// unless `include_drafts` is configured.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match load_post_file(path, None, &self.quill.config) {
                    Ok(post) => {
                        if !post.draft || self.quill.config.include_drafts {
                            posts.push(post);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(posts)
    }

    /// Look up a single standalone post by slug, probing `{slug}.md` then
    /// `{slug}.mdx`. Does NOT filter drafts: direct fetch resolves any
    /// existing file, listings are where draft visibility is decided.
    pub fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let posts_dir = self.posts_dir();
        for ext in MARKDOWN_EXTENSIONS {
            let path = posts_dir.join(format!("{slug}.{ext}"));
            if path.exists() {
                return load_post_file(&path, None, &self.quill.config).map(Some);
            }
        }
        Ok(None)
    }
}

/// Load one markdown file into a `Post`
pub(crate) fn load_post_file(
    path: &Path,
    module: Option<&str>,
    config: &SiteConfig,
) -> Result<Post> {
    let content = fs::read_to_string(path)?;
    let (fm, body) = frontmatter::parse(&content);

    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    Ok(Post::from_front_matter(
        slug,
        module,
        fm,
        body,
        config.words_per_minute,
    ))
}

/// Check if a file is a markdown file
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
