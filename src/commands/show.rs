//! Show a single post with its module context

use anyhow::Result;

use crate::content::ContentLibrary;
use crate::Quill;

/// Resolve one post by slug and print it
pub fn run(quill: &Quill, slug: &str, json: bool) -> Result<()> {
    let library = ContentLibrary::new(quill);

    let Some(post) = library.find_post_by_slug(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let module = match &post.module {
        Some(m) => library.get_module(m)?,
        None => None,
    };
    let progress = library.progress(&post)?;
    let previous = library.previous_post(&post)?;
    let next = library.next_post(&post)?;

    if json {
        let payload = serde_json::json!({
            "post": post,
            "module": module,
            "progress": progress,
            "previous": previous.map(|p| p.slug),
            "next": next.map(|p| p.slug),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!("  slug: {}", post.slug);
    if !post.date.is_empty() {
        println!("  date: {}", post.date);
    }
    if let Some(description) = &post.description {
        println!("  description: {}", description);
    }
    if !post.tags.is_empty() {
        println!("  tags: {}", post.tags.join(", "));
    }
    if let Some(category) = &post.category {
        println!("  category: {}", category);
    }
    println!("  reading time: {} min", post.reading_time);
    if post.draft {
        println!("  draft: yes");
    }

    if let Some(module) = module {
        println!("  module: {}", module.title);
        if let Some(progress) = progress {
            println!("  progress: {}/{}", progress.current, progress.total);
        }
        if let Some(prev) = previous {
            println!("  previous: {}", prev.slug);
        }
        if let Some(next) = next {
            println!("  next: {}", next.slug);
        }
    }

    Ok(())
}
