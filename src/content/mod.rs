//! Content module - post records and front-matter loading

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::FrontMatter;
pub use post::Post;
