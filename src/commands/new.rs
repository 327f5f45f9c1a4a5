//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Quill;

/// Create a new post, standalone or inside a module
pub fn create_post(quill: &Quill, title: &str, module: Option<&str>, draft: bool) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    // Generate filename from the configured pattern
    let filename = quill
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let target_dir = match module {
        Some(m) => quill.source_dir.join(&quill.config.modules_dir).join(m),
        None => quill.source_dir.join(&quill.config.posts_dir),
    };

    fs::create_dir_all(&target_dir)?;

    // A module directory without a descriptor is invisible to every
    // listing, so scaffold one alongside the first post.
    if let Some(m) = module {
        let descriptor = target_dir.join("metadata.md");
        if !descriptor.exists() {
            fs::write(&descriptor, format!("---\ntitle: {m}\n---\n"))?;
            println!("Created: {:?}", descriptor);
        }
    }

    let file_path = target_dir.join(&filename);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = format!("---\ntitle: {}\ndate: {}\n", title, now.format("%Y-%m-%d"));
    if draft {
        content.push_str("draft: true\n");
    }
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
