use crate::parser::{extract_section, parse_decisions, split_frontmatter};
use crate::report;
use crate::{Context, Result};
use std::path::Path;

/// Section that holds a record's decision blocks
const DECISIONS_SECTION: &str = "Decisions";

/// Extract decisions from a session record and render its decision log.
///
/// The log goes to stdout so it can be piped onward; the generated log
/// name and decision count go to stderr. Exit 2 distinguishes "nothing to
/// extract" (section missing, or present but without one usable block)
/// from hard input errors.
pub fn run(path: &Path) -> Result<i32> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("File not found: {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let doc = split_frontmatter(&content);
    if let Some(warning) = &doc.warning {
        eprintln!("Warning: {}", warning);
    }

    let Some(section) = extract_section(&doc.body, DECISIONS_SECTION) else {
        eprintln!("No ## Decisions section found in: {}", path.display());
        return Ok(2);
    };

    let decisions = parse_decisions(&section);
    if decisions.is_empty() {
        eprintln!("No parseable decisions found in: {}", path.display());
        return Ok(2);
    }

    let log = report::render_decision_log(filename, &doc.metadata, &decisions);
    println!("{}", log);

    eprintln!("# Log name: {}", report::log_name(filename));
    eprintln!("# Decisions extracted: {}", decisions.len());

    Ok(0)
}
