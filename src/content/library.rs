//! Content library - the unified view over standalone and module posts

use anyhow::Result;
use thiserror::Error;

use super::modules::{ModuleLoader, ModuleProgress};
use super::posts::PostLoader;
use super::{Module, Post};
use crate::config::SlugPrecedence;
use crate::Quill;

/// Content resolution errors with a typed consumer
#[derive(Debug, Error)]
pub enum ContentError {
    /// Raised only under the `error-on-collision` precedence policy
    #[error("slug '{slug}' matches both a post in module '{module}' and a standalone post")]
    SlugCollision { slug: String, module: String },
}

/// One handle over all content: standalone posts, modules, and the
/// cross-cutting queries page rendering consumes
pub struct ContentLibrary<'a> {
    quill: &'a Quill,
    posts: PostLoader<'a>,
    modules: ModuleLoader<'a>,
}

impl<'a> ContentLibrary<'a> {
    /// Create a new content library
    pub fn new(quill: &'a Quill) -> Self {
        Self {
            quill,
            posts: PostLoader::new(quill),
            modules: ModuleLoader::new(quill),
        }
    }

    /// Every post, module members first, sorted newest-first by date.
    /// The sort is stable, so equal dates keep module-before-standalone
    /// concatenation order.
    pub fn list_all_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.modules.list_all_module_posts()?;
        posts.extend(self.posts.list_posts()?);
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    /// Resolve a post by slug under the configured precedence policy
    pub fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        match self.quill.config.slug_precedence {
            SlugPrecedence::ModuleWins => match self.modules.find_post_across_modules(slug)? {
                Some(post) => Ok(Some(post)),
                None => self.posts.find_post_by_slug(slug),
            },
            SlugPrecedence::StandaloneWins => match self.posts.find_post_by_slug(slug)? {
                Some(post) => Ok(Some(post)),
                None => self.modules.find_post_across_modules(slug),
            },
            SlugPrecedence::ErrorOnCollision => {
                let module_hit = self.modules.find_post_across_modules(slug)?;
                let standalone_hit = self.posts.find_post_by_slug(slug)?;
                match (module_hit, standalone_hit) {
                    (Some(post), Some(_)) => Err(ContentError::SlugCollision {
                        slug: slug.to_string(),
                        module: post.module.unwrap_or_default(),
                    }
                    .into()),
                    (module_hit, standalone_hit) => Ok(module_hit.or(standalone_hit)),
                }
            }
        }
    }

    /// The most recent featured posts, at most `featured_count`
    pub fn list_featured_posts(&self) -> Result<Vec<Post>> {
        Ok(self
            .list_all_posts()?
            .into_iter()
            .filter(|p| p.featured)
            .take(self.quill.config.featured_count)
            .collect())
    }

    /// Every tag across every post, deduplicated and alphabetical
    pub fn list_all_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self
            .list_all_posts()?
            .into_iter()
            .flat_map(|p| p.tags)
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }

    /// All modules, sorted by display order
    pub fn list_modules(&self) -> Result<Vec<Module>> {
        self.modules.list_modules()
    }

    /// Look up a module by slug
    pub fn get_module(&self, slug: &str) -> Result<Option<Module>> {
        self.modules.get_module(slug)
    }

    /// A module's posts in module-internal order
    pub fn list_module_posts(&self, slug: &str) -> Result<Vec<Post>> {
        self.modules.list_module_posts(slug)
    }

    /// The next post within a module, `None` at the end
    pub fn next_post(&self, post: &Post) -> Result<Option<Post>> {
        self.modules.next_post(post)
    }

    /// The previous post within a module, `None` at the start
    pub fn previous_post(&self, post: &Post) -> Result<Option<Post>> {
        self.modules.previous_post(post)
    }

    /// A post's position within its module
    pub fn progress(&self, post: &Post) -> Result<Option<ModuleProgress>> {
        self.modules.progress(post)
    }
}
