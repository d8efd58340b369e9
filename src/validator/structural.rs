//! Kind-specific structural rules
//!
//! Checks that do not fit the declarative field tables: the session branch
//! grammar, council participant parity and session references, and the
//! ADR document conventions. Dispatched over the closed set of record
//! kinds by the schema engine.

use crate::parser::extract_section;
use crate::validator::schema::ADR_STATUSES;
use regex::Regex;
use serde_yaml::{Mapping, Value};

/// Session reference as it appears in council metadata: a session filename
/// without the `.md` extension.
const SESSION_REF_PATTERN: &str = r"^\d{8}-\d{6}-[a-z0-9-]+$";

/// Extra session rules: the optional `branch` field grammar
pub fn session_rules(session: &Mapping, errors: &mut Vec<String>) {
    let branch = match session.get("branch") {
        None | Some(Value::Null) => return,
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.push("Invalid session.branch: must be a string".to_string());
            return;
        }
    };

    if branch.is_empty() {
        return;
    }

    if branch.contains(' ') {
        errors.push(format!(
            "Invalid session.branch: '{}' contains spaces (branch names cannot have spaces)",
            branch
        ));
    } else if branch.starts_with('/') || branch.ends_with('/') {
        errors.push(format!(
            "Invalid session.branch: '{}' cannot start or end with '/'",
            branch
        ));
    } else if branch.contains("//") {
        errors.push(format!(
            "Invalid session.branch: '{}' contains consecutive slashes",
            branch
        ));
    }
}

/// Extra council rules: participant count and session reference format
pub fn council_rules(council: &Mapping, errors: &mut Vec<String>) {
    match council.get("participants") {
        Some(Value::Sequence(participants)) if !participants.is_empty() => {
            if participants.len() < 5 {
                errors.push(format!(
                    "Council requires at least 5 participants (got {})",
                    participants.len()
                ));
            }
            if participants.len() % 2 == 0 {
                errors.push(format!(
                    "Council requires an ODD number of participants (got {})",
                    participants.len()
                ));
            }
        }
        None | Some(Value::Null) | Some(Value::Sequence(_)) => {}
        Some(_) => {
            errors.push("Invalid council.participants: must be a sequence".to_string());
        }
    }

    if let Some(Value::String(session)) = council.get("session") {
        if !session.is_empty() {
            let re = Regex::new(SESSION_REF_PATTERN).expect("static pattern");
            if !re.is_match(session) {
                errors.push(format!("Invalid session reference format: {}", session));
            }
        }
    }
}

/// ADR document rules: title line, decision date, status field, and the
/// Consequences subsections. ADRs carry their fields in the body, not in
/// frontmatter.
pub fn adr_rules(content: &str, errors: &mut Vec<String>) {
    let first_line = content.lines().next().unwrap_or("");
    if !first_line.starts_with("# ADR-") {
        errors.push("Missing ADR title (should start with '# ADR-XXX:')".to_string());
    }

    let date_re = Regex::new(r"\*\*Decision Date\*\*:\s*\d{4}-\d{2}-\d{2}").expect("static pattern");
    if !content.lines().any(|line| date_re.is_match(line)) {
        errors.push("Missing Decision Date (format: **Decision Date**: YYYY-MM-DD)".to_string());
    }

    let status_re = Regex::new(r"\*\*Status\*\*:\s*(\w+)").expect("static pattern");
    match content.lines().find_map(|line| status_re.captures(line)) {
        None => errors.push("Missing Status field".to_string()),
        Some(caps) => {
            let status = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if !ADR_STATUSES.contains(&status) {
                errors.push(format!(
                    "Invalid status '{}'. Must be one of: {}",
                    status,
                    ADR_STATUSES.join(", ")
                ));
            }
        }
    }

    // Subsections are looked for inside the Consequences span only; a
    // missing Consequences section is reported by the section check.
    if let Some(consequences) = extract_section(content, "Consequences") {
        for subsection in ["Positive", "Negative"] {
            let heading = format!("### {}", subsection);
            if !consequences
                .lines()
                .any(|line| line.trim_end() == heading)
            {
                errors.push(format!(
                    "Consequences section missing ### {} subsection",
                    subsection
                ));
            }
        }
    }
}
