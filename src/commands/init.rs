//! Initialize a new Quill site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already a Quill site: {:?}", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/modules"))?;

    // Create default _config.yml
    let config_content = r#"# Quill Configuration

# Site
title: Quill
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com

# Directory
source_dir: content
posts_dir: posts
modules_dir: modules

# Writing
new_post_name: :title.md
include_drafts: false

# Reading
words_per_minute: 200
featured_count: 3

# Lookup
# One of: module-wins, standalone-wins, error-on-collision
slug_precedence: module-wins
"#;
    fs::write(&config_path, config_content)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample = format!(
        r#"---
title: Hello World
date: {}
tags:
  - meta
---

Welcome to your new blog. Edit or delete this post, then run
`quill new "My first post"` to write your own.
"#,
        now.format("%Y-%m-%d")
    );
    fs::write(target_dir.join("content/posts/hello-world.md"), sample)?;

    Ok(())
}
