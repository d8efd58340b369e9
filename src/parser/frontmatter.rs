//! YAML Frontmatter Splitter
//!
//! Separates a record into its YAML metadata block and markdown body, with:
//! - BOM (Byte Order Mark) stripping
//! - Line ending normalization (CRLF → LF)
//! - Non-fatal decoding: a malformed block degrades to empty metadata

use serde_yaml::{Mapping, Value};

/// Record split into metadata and body
#[derive(Debug, Clone)]
pub struct SplitDocument {
    /// Decoded frontmatter mapping (empty when absent or malformed)
    pub metadata: Mapping,
    /// Markdown body; the whole normalized input when there is no block
    pub body: String,
    /// Decode warning, when a block was present but unreadable
    pub warning: Option<String>,
}

impl SplitDocument {
    fn without_metadata(body: String, warning: Option<String>) -> Self {
        Self {
            metadata: Mapping::new(),
            body,
            warning,
        }
    }
}

/// Split a record into frontmatter metadata and body.
///
/// The document must open with a `---` delimiter and contain a second one;
/// otherwise the entire input is the body. A block that fails to decode as
/// a YAML mapping produces a warning and the empty mapping — the caller is
/// never aborted.
pub fn split_frontmatter(content: &str) -> SplitDocument {
    let normalized = normalize_content(content);

    if !normalized.starts_with("---") {
        return SplitDocument::without_metadata(normalized, None);
    }

    // At most three parts: prefix before the opening delimiter (empty),
    // the metadata block, and the body.
    let parts: Vec<&str> = normalized.splitn(3, "---").collect();
    if parts.len() < 3 {
        return SplitDocument::without_metadata(normalized, None);
    }

    match serde_yaml::from_str::<Value>(parts[1]) {
        Ok(Value::Mapping(metadata)) => SplitDocument {
            metadata,
            body: parts[2].to_string(),
            warning: None,
        },
        // An all-comment or blank block decodes to null
        Ok(Value::Null) => SplitDocument::without_metadata(parts[2].to_string(), None),
        Ok(_) => SplitDocument::without_metadata(
            normalized.clone(),
            Some("Frontmatter is not a key/value mapping".to_string()),
        ),
        Err(e) => SplitDocument::without_metadata(
            normalized.clone(),
            Some(format!("Could not parse YAML frontmatter: {}", e)),
        ),
    }
}

/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF → LF
/// - CR → LF (old Mac style)
pub fn normalize_content(content: &str) -> String {
    let mut s = content.to_string();

    if let Some(stripped) = s.strip_prefix('\u{FEFF}') {
        s = stripped.to_string();
    }

    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s
}
