//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::ContentLibrary;
use crate::Quill;

/// List site content by type
pub fn run(quill: &Quill, content_type: &str, json: bool) -> Result<()> {
    let library = ContentLibrary::new(quill);

    match content_type {
        "post" | "posts" => {
            let posts = library.list_all_posts()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in posts {
                let home = post.module.as_deref().unwrap_or("-");
                println!("  {} - {} [{}]", post.date, post.title, home);
            }
        }
        "module" | "modules" => {
            let modules = library.list_modules()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&modules)?);
                return Ok(());
            }
            println!("Modules ({}):", modules.len());
            for module in modules {
                let posts = library.list_module_posts(&module.slug)?;
                println!(
                    "  {:>3}  {} ({} posts)",
                    module.order,
                    module.title,
                    posts.len()
                );
            }
        }
        "tag" | "tags" => {
            let tags = library.list_all_tags()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
                return Ok(());
            }
            let mut counts: HashMap<&str, usize> = HashMap::new();
            let posts = library.list_all_posts()?;
            for post in &posts {
                for tag in &post.tags {
                    *counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            for tag in &tags {
                println!("  {} ({})", tag, counts.get(tag.as_str()).unwrap_or(&0));
            }
        }
        "featured" => {
            let posts = library.list_featured_posts()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Featured ({}):", posts.len());
            for post in posts {
                println!("  {} - {}", post.date, post.title);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, module, tag, featured",
                content_type
            );
        }
    }

    Ok(())
}
