//! Report formatting
//!
//! The two output shapes the toolkit produces: the consolidated pass/fail
//! listing for validators, and the decision log rendered from extracted
//! decisions when a session is archived. Both are plain strings so tests
//! can assert on the exact ordered output.

use crate::models::{Decision, Diagnostics};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Render the consolidated diagnostic listing for one document.
///
/// Errors are grouped before warnings; the verdict line depends only on
/// the error list.
pub fn render_diagnostics(diag: &Diagnostics) -> String {
    let mut out = String::new();

    if !diag.errors.is_empty() {
        out.push_str("VALIDATION FAILED\n");
        out.push_str("\nErrors:\n");
        for error in &diag.errors {
            out.push_str("  - ");
            out.push_str(error);
            out.push('\n');
        }
    }

    if !diag.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &diag.warnings {
            out.push_str("  - ");
            out.push_str(warning);
            out.push('\n');
        }
    }

    if diag.errors.is_empty() {
        if diag.has_warnings() {
            out.push_str("VALIDATION PASSED (with warnings)\n");
        } else {
            out.push_str("VALIDATION PASSED\n");
        }
    }

    out
}

/// Descriptive slug of a record filename: the stem with any leading
/// `YYYYMMDD-HHMMSS-` timestamp prefix stripped.
pub fn slug(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let prefix = Regex::new(r"^\d{8}-\d{6}-").expect("static pattern");
    prefix.replace(stem, "").to_string()
}

/// Name under which a rendered decision log is filed
pub fn log_name(filename: &str) -> String {
    format!("session-{}-decisions.md", slug(filename))
}

/// Render the decision log for an archived session.
///
/// The context block falls back to `Unknown Session` / `N/A` / the current
/// time when the metadata lacks a title, issue id, or archive timestamp.
/// Decisions render in input order; rationale and council lines appear
/// only when non-empty.
pub fn render_decision_log(
    filename: &str,
    metadata: &Mapping,
    decisions: &[Decision],
) -> String {
    let title = session_field(metadata, "title").unwrap_or_else(|| "Unknown Session".to_string());
    let issue = session_field(metadata, "issue").unwrap_or_else(|| "N/A".to_string());
    let archived = session_field(metadata, "archived_at")
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let source_name = Path::new(filename)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let mut lines = vec![
        format!("# Decision Log: {}", slug(filename)),
        String::new(),
        "## Session Context".to_string(),
        format!("- **Session**: {}", source_name),
        format!("- **Title**: {}", title),
        format!("- **Archived**: {}", archived),
        format!("- **Issue**: {}", issue),
        String::new(),
        "## Key Decisions".to_string(),
        String::new(),
    ];

    for (i, decision) in decisions.iter().enumerate() {
        lines.push(format!("### Decision {}: {}", i + 1, decision.title));
        lines.push(format!("**Decision**: {}", decision.decision));
        if !decision.rationale.is_empty() {
            lines.push(format!("**Rationale**: {}", decision.rationale));
        }
        if !decision.council.is_empty() {
            lines.push(format!("**Council**: {}", decision.council));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn session_field(metadata: &Mapping, key: &str) -> Option<String> {
    let Some(Value::Mapping(session)) = metadata.get("session") else {
        return None;
    };
    match session.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_decisions() -> Vec<Decision> {
        vec![
            Decision {
                title: "Adopt event log".to_string(),
                decision: "Append events to a single log table".to_string(),
                rationale: "Replayable".to_string(),
                council: String::new(),
            },
            Decision {
                title: "Keep sync engine".to_string(),
                decision: "No async runtime".to_string(),
                rationale: String::new(),
                council: "20250110-110000-sync-vs-async".to_string(),
            },
        ]
    }

    #[test]
    fn test_failed_listing_shape() {
        let mut diag = Diagnostics::new();
        diag.push_error("first error");
        diag.push_error("second error");
        diag.push_warning("a warning");
        let rendered = render_diagnostics(&diag);
        assert_eq!(
            rendered,
            "VALIDATION FAILED\n\nErrors:\n  - first error\n  - second error\n\nWarnings:\n  - a warning\n"
        );
    }

    #[test]
    fn test_passed_listing() {
        let rendered = render_diagnostics(&Diagnostics::new());
        assert_eq!(rendered, "VALIDATION PASSED\n");
    }

    #[test]
    fn test_passed_with_warnings_listing() {
        let mut diag = Diagnostics::new();
        diag.push_warning("note");
        let rendered = render_diagnostics(&diag);
        assert_eq!(
            rendered,
            "\nWarnings:\n  - note\nVALIDATION PASSED (with warnings)\n"
        );
    }

    #[test]
    fn test_slug_strips_timestamp_prefix() {
        assert_eq!(slug("20250115-093000-fix-login.md"), "fix-login");
        assert_eq!(slug("fix-login.md"), "fix-login");
        assert_eq!(slug("dir/20250115-093000-fix-login.md"), "fix-login");
    }

    #[test]
    fn test_log_name() {
        assert_eq!(
            log_name("20250115-093000-fix-login.md"),
            "session-fix-login-decisions.md"
        );
    }

    #[test]
    fn test_decision_log_renders_in_order_with_optional_fields() {
        let metadata: Mapping = serde_yaml::from_str(
            "session:\n  title: Fix login flow\n  issue: ENG-142\n  archived_at: 2025-01-16T00:00:00Z\n",
        )
        .unwrap();
        let log = render_decision_log(
            "20250115-093000-fix-login.md",
            &metadata,
            &sample_decisions(),
        );

        assert!(log.starts_with("# Decision Log: fix-login\n"));
        assert!(log.contains("- **Session**: 20250115-093000-fix-login.md"));
        assert!(log.contains("- **Title**: Fix login flow"));
        assert!(log.contains("- **Archived**: 2025-01-16T00:00:00Z"));
        assert!(log.contains("- **Issue**: ENG-142"));

        let first = log.find("### Decision 1: Adopt event log").unwrap();
        let second = log.find("### Decision 2: Keep sync engine").unwrap();
        assert!(first < second);

        assert!(log.contains("**Rationale**: Replayable"));
        assert!(log.contains("**Council**: 20250110-110000-sync-vs-async"));
        // Decision 2 has no rationale line
        let second_block = &log[second..];
        assert!(!second_block.contains("**Rationale**"));
    }

    #[test]
    fn test_decision_log_fallbacks() {
        let metadata = Mapping::new();
        let log = render_decision_log("20250115-093000-fix-login.md", &metadata, &[]);
        assert!(log.contains("- **Title**: Unknown Session"));
        assert!(log.contains("- **Issue**: N/A"));
        assert!(log.contains("- **Archived**: "));
    }
}
