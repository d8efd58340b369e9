use crate::models::{Diagnostics, RecordKind};
use crate::parser::{normalize_content, split_frontmatter};
use crate::report;
use crate::validator::{compat, schema};
use crate::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Run a validate subcommand for one record file
pub fn run(kind: RecordKind, path: &Path) -> Result<i32> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("File not found: {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    println!(
        "{}",
        format!("🔍 Validating {}: {}", kind.name(), path.display()).cyan()
    );

    let diag = validate_content(kind, filename, &content);
    print!("{}", report::render_diagnostics(&diag));

    Ok(if diag.is_valid() { 0 } else { 1 })
}

/// Assemble the consolidated diagnostics for one record.
///
/// Sessions also get a compatibility scan over the body; its findings are
/// surfaced as warnings here and never fail validation (the standalone
/// `compat` command is where scanner errors block).
pub fn validate_content(kind: RecordKind, filename: &str, content: &str) -> Diagnostics {
    let mut diag = Diagnostics::new();

    match kind {
        RecordKind::Adr => {
            // ADRs carry their fields in the document itself
            let document = normalize_content(content);
            diag.errors =
                schema::validate_record(kind, filename, &serde_yaml::Mapping::new(), &document);
        }
        RecordKind::Session | RecordKind::Council => {
            let doc = split_frontmatter(content);
            if let Some(warning) = doc.warning {
                diag.push_warning(warning);
            }
            diag.errors = schema::validate_record(kind, filename, &doc.metadata, &doc.body);

            if kind == RecordKind::Session {
                let scan = compat::scan(&doc.body);
                diag.warnings.extend(scan.errors);
                diag.warnings.extend(scan.warnings);
            }
        }
    }

    diag
}
