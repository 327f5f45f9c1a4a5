//! Content module - resolves markdown files into posts and modules

pub mod frontmatter;
mod library;
mod module;
mod modules;
mod post;
mod posts;

pub use frontmatter::{ModuleFrontMatter, PostFrontMatter};
pub use library::{ContentError, ContentLibrary};
pub use module::Module;
pub use modules::{ModuleLoader, ModuleProgress};
pub use post::Post;
pub use posts::PostLoader;
