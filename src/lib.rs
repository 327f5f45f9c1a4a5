//! quill-rs: a markdown blog content engine with course-style post modules
//!
//! This crate resolves a directory tree of markdown files into posts and
//! modules (ordered post collections) with navigation and aggregation
//! queries for a statically generated blog.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::Path;

/// The main Quill application
#[derive(Clone)]
pub struct Quill {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content source directory
    pub source_dir: std::path::PathBuf,
}

impl Quill {
    /// Create a new Quill instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    /// One handle over the site's resolved content
    pub fn library(&self) -> content::ContentLibrary<'_> {
        content::ContentLibrary::new(self)
    }
}
