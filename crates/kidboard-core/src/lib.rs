pub mod frontmatter;
pub mod matcher;
pub mod relative;
pub mod types;

pub use types::*;
