// Trackd - Work-tracking Record Toolkit
// Validates session, council, and ADR records and extracts their decisions

pub mod cli;
pub mod config;
pub mod models;
pub mod parser;
pub mod report;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{Decision, Diagnostics, RecordKind};
pub use parser::{split_frontmatter, SplitDocument};
