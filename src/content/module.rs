//! Module model

use serde::{Deserialize, Serialize};

use super::frontmatter::ModuleFrontMatter;

/// Display order assigned to modules whose descriptor omits `order`;
/// sorts them after every explicitly ordered module.
pub const DEFAULT_MODULE_ORDER: i64 = 999;

/// A named, ordered collection of posts backed by one directory and one
/// `metadata.md` descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier, derived from the directory name
    pub slug: String,

    /// Module title
    pub title: String,

    /// Short description
    pub description: Option<String>,

    /// Display order among all modules
    pub order: i64,

    /// Explicit member ordering by post slug; empty means date order
    pub post_order: Vec<String>,
}

impl Module {
    /// Build a module from its descriptor front-matter, applying defaults
    pub fn from_front_matter(slug: &str, fm: ModuleFrontMatter) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_default(),
            description: fm.description,
            order: fm.order.unwrap_or(DEFAULT_MODULE_ORDER),
            post_order: fm.post_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_defaults_to_last() {
        let module = Module::from_front_matter("extras", ModuleFrontMatter::default());
        assert_eq!(module.order, DEFAULT_MODULE_ORDER);
        assert_eq!(module.title, "");
        assert!(module.post_order.is_empty());
    }

    #[test]
    fn test_explicit_fields() {
        let fm = ModuleFrontMatter {
            title: Some("Rust Basics".to_string()),
            description: Some("A short course".to_string()),
            order: Some(1),
            post_order: vec!["intro".to_string(), "setup".to_string()],
        };
        let module = Module::from_front_matter("rust-basics", fm);
        assert_eq!(module.slug, "rust-basics");
        assert_eq!(module.order, 1);
        assert_eq!(module.post_order, vec!["intro", "setup"]);
    }
}
