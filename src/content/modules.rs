//! Module loading - module directories, member posts, ordering, navigation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::posts::{is_markdown_file, load_post_file, MARKDOWN_EXTENSIONS};
use super::{frontmatter, Module, Post};
use crate::Quill;

/// The descriptor file every module directory must contain. A directory
/// without it is not a module and stays invisible.
const MODULE_METADATA_FILE: &str = "metadata.md";

/// Position of a post within its module's ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    /// 1-based position
    pub current: usize,
    /// Member count of the module
    pub total: usize,
}

/// Loads modules and their member posts
pub struct ModuleLoader<'a> {
    quill: &'a Quill,
}

impl<'a> ModuleLoader<'a> {
    /// Create a new module loader
    pub fn new(quill: &'a Quill) -> Self {
        Self { quill }
    }

    fn modules_dir(&self) -> PathBuf {
        self.quill.source_dir.join(&self.quill.config.modules_dir)
    }

    /// Load all modules, sorted ascending by `order`. The sort is stable:
    /// equal orders keep directory scan order.
    pub fn list_modules(&self) -> Result<Vec<Module>> {
        let modules_dir = self.modules_dir();
        if !modules_dir.exists() {
            return Ok(Vec::new());
        }

        let mut modules = Vec::new();

        for entry in WalkDir::new(&modules_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let slug = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            if let Some(module) = self.load_module(path, &slug)? {
                modules.push(module);
            }
        }

        modules.sort_by_key(|m| m.order);

        Ok(modules)
    }

    /// Read one module's descriptor. `None` when the directory has no
    /// `metadata.md`.
    fn load_module(&self, dir: &Path, slug: &str) -> Result<Option<Module>> {
        let descriptor = dir.join(MODULE_METADATA_FILE);
        if !descriptor.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&descriptor)?;
        let (fm, _body) = frontmatter::parse(&content);
        Ok(Some(Module::from_front_matter(slug, fm)))
    }

    /// Look up a module by slug (its directory name)
    pub fn get_module(&self, slug: &str) -> Result<Option<Module>> {
        let dir = self.modules_dir().join(slug);
        if !dir.is_dir() {
            return Ok(None);
        }
        self.load_module(&dir, slug)
    }

    /// Load a module's member posts in module-internal order.
    ///
    /// Posts named in `post_order` come first, in that order; the rest
    /// follow by ascending date (oldest first), which is a course read
    /// top to bottom, not a feed.
    pub fn list_module_posts(&self, slug: &str) -> Result<Vec<Post>> {
        let Some(module) = self.get_module(slug)? else {
            return Ok(Vec::new());
        };

        let dir = self.modules_dir().join(slug);
        let mut posts = Vec::new();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            if path.file_name().and_then(|s| s.to_str()) == Some(MODULE_METADATA_FILE) {
                continue;
            }
            match load_post_file(path, Some(slug), &self.quill.config) {
                Ok(post) => {
                    if !post.draft || self.quill.config.include_drafts {
                        posts.push(post);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load module post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by(|a, b| compare_module_posts(a, b, &module.post_order));

        Ok(posts)
    }

    /// Concatenate every module's ordered posts, in module order
    pub fn list_all_module_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for module in self.list_modules()? {
            posts.extend(self.list_module_posts(&module.slug)?);
        }
        Ok(posts)
    }

    /// Look up a post by slug across all modules, probing filenames in
    /// module order. A slug present in two modules resolves to whichever
    /// module sorts first.
    pub fn find_post_across_modules(&self, slug: &str) -> Result<Option<Post>> {
        for module in self.list_modules()? {
            let dir = self.modules_dir().join(&module.slug);
            for ext in MARKDOWN_EXTENSIONS {
                let path = dir.join(format!("{slug}.{ext}"));
                if path.exists() {
                    return load_post_file(&path, Some(&module.slug), &self.quill.config).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// The post after `post` in its module, or `None` at the end
    pub fn next_post(&self, post: &Post) -> Result<Option<Post>> {
        let Some(module_slug) = &post.module else {
            return Ok(None);
        };
        let posts = self.list_module_posts(module_slug)?;
        let pos = posts.iter().position(|p| p.slug == post.slug);
        Ok(pos.and_then(|i| posts.get(i + 1).cloned()))
    }

    /// The post before `post` in its module, or `None` at the start
    pub fn previous_post(&self, post: &Post) -> Result<Option<Post>> {
        let Some(module_slug) = &post.module else {
            return Ok(None);
        };
        let posts = self.list_module_posts(module_slug)?;
        let pos = posts.iter().position(|p| p.slug == post.slug);
        Ok(pos.and_then(|i| i.checked_sub(1)).map(|i| posts[i].clone()))
    }

    /// Where `post` sits within its module
    pub fn progress(&self, post: &Post) -> Result<Option<ModuleProgress>> {
        let Some(module_slug) = &post.module else {
            return Ok(None);
        };
        let posts = self.list_module_posts(module_slug)?;
        Ok(posts
            .iter()
            .position(|p| p.slug == post.slug)
            .map(|i| ModuleProgress {
                current: i + 1,
                total: posts.len(),
            }))
    }
}

/// Intra-module ordering: explicit `post_order` positions first, then
/// ascending date for everything unlisted.
fn compare_module_posts(a: &Post, b: &Post, post_order: &[String]) -> Ordering {
    let pos_a = post_order.iter().position(|s| *s == a.slug);
    let pos_b = post_order.iter().position(|s| *s == b.slug);

    match (pos_a, pos_b) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.date.cmp(&b.date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> Quill {
        Quill::new(dir.path()).unwrap()
    }

    fn write_module(dir: &TempDir, slug: &str, frontmatter: &str) {
        let module_dir = dir.path().join("content/modules").join(slug);
        fs::create_dir_all(&module_dir).unwrap();
        fs::write(
            module_dir.join("metadata.md"),
            format!("---\n{frontmatter}---\n"),
        )
        .unwrap();
    }

    fn write_module_post(dir: &TempDir, module: &str, name: &str, frontmatter: &str) {
        let module_dir = dir.path().join("content/modules").join(module);
        fs::create_dir_all(&module_dir).unwrap();
        fs::write(
            module_dir.join(name),
            format!("---\n{frontmatter}---\n\nBody.\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let quill = site(&dir);
        assert!(ModuleLoader::new(&quill).list_modules().unwrap().is_empty());
    }

    #[test]
    fn test_directory_without_metadata_is_invisible() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "visible", "title: Visible\n");
        fs::create_dir_all(dir.path().join("content/modules/bare")).unwrap();
        let quill = site(&dir);

        let loader = ModuleLoader::new(&quill);
        let modules = loader.list_modules().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].slug, "visible");
        assert!(loader.get_module("bare").unwrap().is_none());
    }

    #[test]
    fn test_modules_sorted_by_order_with_999_default() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "unordered", "title: Unordered\n");
        write_module(&dir, "second", "title: Second\norder: 2\n");
        write_module(&dir, "first", "title: First\norder: 1\n");
        let quill = site(&dir);

        let modules = ModuleLoader::new(&quill).list_modules().unwrap();
        let slugs: Vec<_> = modules.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, ["first", "second", "unordered"]);
        assert_eq!(modules[2].order, 999);
    }

    #[test]
    fn test_get_module_missing() {
        let dir = TempDir::new().unwrap();
        let quill = site(&dir);
        assert!(ModuleLoader::new(&quill)
            .get_module("nope")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_member_posts_exclude_metadata_and_drafts() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "title: M\n");
        write_module_post(&dir, "m", "a.md", "title: A\ndate: 2024-01-01\n");
        write_module_post(&dir, "m", "b.md", "title: B\ndate: 2024-01-02\ndraft: true\n");
        let quill = site(&dir);

        let posts = ModuleLoader::new(&quill).list_module_posts("m").unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "a");
        assert_eq!(posts[0].module, Some("m".to_string()));
    }

    #[test]
    fn test_default_order_is_date_ascending() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "title: M\n");
        write_module_post(&dir, "m", "newer.md", "date: 2024-03-01\n");
        write_module_post(&dir, "m", "older.md", "date: 2024-01-01\n");
        write_module_post(&dir, "m", "middle.md", "date: 2024-02-01\n");
        let quill = site(&dir);

        let posts = ModuleLoader::new(&quill).list_module_posts("m").unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["older", "middle", "newer"]);
    }

    #[test]
    fn test_explicit_order_beats_dates() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "postOrder:\n  - b\n  - a\n");
        write_module_post(&dir, "m", "a.md", "date: 2024-01-01\n");
        write_module_post(&dir, "m", "b.md", "date: 2024-02-01\n");
        let quill = site(&dir);

        let posts = ModuleLoader::new(&quill).list_module_posts("m").unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a"]);
    }

    #[test]
    fn test_partially_ordered_members_come_first() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "postOrder:\n  - a\n");
        write_module_post(&dir, "m", "a.md", "date: 2024-12-01\n");
        write_module_post(&dir, "m", "c.md", "date: 2024-01-01\n");
        let quill = site(&dir);

        let posts = ModuleLoader::new(&quill).list_module_posts("m").unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "c"]);
    }

    #[test]
    fn test_course_ordering_scenario() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "postOrder:\n  - intro\n  - setup\n");
        write_module_post(&dir, "m", "intro.md", "date: 2024-01-10\n");
        write_module_post(&dir, "m", "setup.md", "date: 2024-01-05\n");
        write_module_post(&dir, "m", "extra.md", "date: 2024-01-20\n");
        let quill = site(&dir);

        let posts = ModuleLoader::new(&quill).list_module_posts("m").unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["intro", "setup", "extra"]);
    }

    #[test]
    fn test_posts_in_missing_module() {
        let dir = TempDir::new().unwrap();
        let quill = site(&dir);
        assert!(ModuleLoader::new(&quill)
            .list_module_posts("ghost")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_post_across_modules_in_module_order() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "beta", "order: 2\n");
        write_module(&dir, "alpha", "order: 1\n");
        write_module_post(&dir, "beta", "shared.md", "title: From beta\n");
        write_module_post(&dir, "alpha", "shared.md", "title: From alpha\n");
        let quill = site(&dir);

        let post = ModuleLoader::new(&quill)
            .find_post_across_modules("shared")
            .unwrap()
            .unwrap();
        assert_eq!(post.title, "From alpha");
        assert_eq!(post.module, Some("alpha".to_string()));
    }

    #[test]
    fn test_navigation_walks_the_ordered_list() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "postOrder:\n  - intro\n  - setup\n  - wrap\n");
        write_module_post(&dir, "m", "intro.md", "date: 2024-01-01\n");
        write_module_post(&dir, "m", "setup.md", "date: 2024-01-02\n");
        write_module_post(&dir, "m", "wrap.md", "date: 2024-01-03\n");
        let quill = site(&dir);
        let loader = ModuleLoader::new(&quill);

        let posts = loader.list_module_posts("m").unwrap();
        let next = loader.next_post(&posts[0]).unwrap().unwrap();
        assert_eq!(next.slug, "setup");
        let prev = loader.previous_post(&posts[1]).unwrap().unwrap();
        assert_eq!(prev.slug, "intro");
    }

    #[test]
    fn test_navigation_boundaries_no_wraparound() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "title: M\n");
        write_module_post(&dir, "m", "first.md", "date: 2024-01-01\n");
        write_module_post(&dir, "m", "last.md", "date: 2024-01-02\n");
        let quill = site(&dir);
        let loader = ModuleLoader::new(&quill);

        let posts = loader.list_module_posts("m").unwrap();
        assert!(loader.previous_post(&posts[0]).unwrap().is_none());
        assert!(loader.next_post(&posts[1]).unwrap().is_none());
    }

    #[test]
    fn test_navigation_requires_module_membership() {
        let dir = TempDir::new().unwrap();
        let quill = site(&dir);
        let loader = ModuleLoader::new(&quill);

        let standalone = Post::from_front_matter(
            "loner",
            None,
            crate::content::PostFrontMatter::default(),
            "",
            200,
        );
        assert!(loader.next_post(&standalone).unwrap().is_none());
        assert!(loader.previous_post(&standalone).unwrap().is_none());
        assert!(loader.progress(&standalone).unwrap().is_none());
    }

    #[test]
    fn test_progress_covers_one_through_total() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "title: M\n");
        write_module_post(&dir, "m", "a.md", "date: 2024-01-01\n");
        write_module_post(&dir, "m", "b.md", "date: 2024-01-02\n");
        write_module_post(&dir, "m", "c.md", "date: 2024-01-03\n");
        let quill = site(&dir);
        let loader = ModuleLoader::new(&quill);

        let posts = loader.list_module_posts("m").unwrap();
        for (i, post) in posts.iter().enumerate() {
            let progress = loader.progress(post).unwrap().unwrap();
            assert_eq!(progress.current, i + 1);
            assert_eq!(progress.total, 3);
        }
    }

    #[test]
    fn test_progress_for_post_missing_from_its_module() {
        let dir = TempDir::new().unwrap();
        write_module(&dir, "m", "title: M\n");
        write_module_post(&dir, "m", "a.md", "date: 2024-01-01\n");
        let quill = site(&dir);
        let loader = ModuleLoader::new(&quill);

        let phantom = Post::from_front_matter(
            "phantom",
            Some("m"),
            crate::content::PostFrontMatter::default(),
            "",
            200,
        );
        assert!(loader.progress(&phantom).unwrap().is_none());
    }
}
