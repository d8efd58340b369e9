pub mod frontmatter;
pub mod sections;

pub use frontmatter::{normalize_content, split_frontmatter, SplitDocument};
pub use sections::{extract_section, parse_decisions};
