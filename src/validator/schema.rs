//! Schema-driven record validation
//!
//! Each record kind's requirements are declared as data: a `KindSchema`
//! names the root metadata blocks, their required fields, the value checks
//! that apply, and the required body sections. A single engine walks the
//! table in a fixed order so the error sequence of one pass is
//! deterministic: filename, block presence, field presence, enum
//! membership, timestamp parseability, kind-specific rules, body sections.
//!
//! Validators only accumulate. The lone skip rule: a missing root block
//! reports once and drops the field checks for that block only.

use crate::models::RecordKind;
use crate::validator::structural;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_yaml::{Mapping, Value};

pub const SESSION_STATUSES: &[&str] = &["in_progress", "paused", "completed", "archived"];
pub const COUNCIL_STATUSES: &[&str] = &["pending", "approved", "rejected", "deferred"];
pub const ADR_STATUSES: &[&str] = &["Proposed", "Accepted", "Deprecated", "Superseded"];

/// How a required field's value is policed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key must exist; a blank value is tolerated
    Required,
    /// Key must exist and the value must be non-empty
    RequiredNonEmpty,
}

/// Value-level constraint, applied when the value is present and non-empty
#[derive(Debug, Clone, Copy)]
pub enum ValueCheck {
    /// Value must equal one of the listed literals
    OneOf(&'static [&'static str]),
    /// Value must parse as an ISO-8601 timestamp
    Timestamp,
}

/// One required field of a metadata block
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
    pub check: Option<ValueCheck>,
}

/// A root metadata block and its required fields
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Everything the engine needs to know about one record kind
#[derive(Debug, Clone, Copy)]
pub struct KindSchema {
    pub kind: RecordKind,
    pub filename_pattern: &'static str,
    pub filename_hint: &'static str,
    pub blocks: &'static [BlockSpec],
    /// Required `## ` section names, without the marker
    pub required_sections: &'static [&'static str],
}

const SESSION_SCHEMA: KindSchema = KindSchema {
    kind: RecordKind::Session,
    filename_pattern: r"^\d{8}-\d{6}-[a-z0-9-]+\.md$",
    filename_hint: "YYYYMMDD-HHMMSS-<description>.md",
    blocks: &[
        BlockSpec {
            name: "session",
            fields: &[
                FieldSpec {
                    name: "title",
                    presence: Presence::RequiredNonEmpty,
                    check: None,
                },
                FieldSpec {
                    name: "status",
                    presence: Presence::RequiredNonEmpty,
                    check: Some(ValueCheck::OneOf(SESSION_STATUSES)),
                },
                FieldSpec {
                    name: "created",
                    presence: Presence::RequiredNonEmpty,
                    check: Some(ValueCheck::Timestamp),
                },
                FieldSpec {
                    name: "last_updated",
                    presence: Presence::RequiredNonEmpty,
                    check: Some(ValueCheck::Timestamp),
                },
            ],
        },
        BlockSpec {
            name: "orchestration",
            fields: &[FieldSpec {
                name: "current_task",
                presence: Presence::RequiredNonEmpty,
                check: None,
            }],
        },
    ],
    required_sections: &["Context", "Current State", "Next Steps"],
};

const COUNCIL_SCHEMA: KindSchema = KindSchema {
    kind: RecordKind::Council,
    filename_pattern: r"^\d{8}-\d{6}-[a-z0-9-]+\.md$",
    filename_hint: "YYYYMMDD-HHMMSS-<topic>.md",
    blocks: &[BlockSpec {
        name: "council",
        fields: &[
            FieldSpec {
                name: "topic",
                presence: Presence::Required,
                check: None,
            },
            FieldSpec {
                name: "timestamp",
                presence: Presence::Required,
                check: Some(ValueCheck::Timestamp),
            },
            FieldSpec {
                name: "status",
                presence: Presence::Required,
                check: Some(ValueCheck::OneOf(COUNCIL_STATUSES)),
            },
            FieldSpec {
                name: "session",
                presence: Presence::Required,
                check: None,
            },
            FieldSpec {
                name: "participants",
                presence: Presence::Required,
                check: None,
            },
            FieldSpec {
                name: "decision",
                presence: Presence::Required,
                check: None,
            },
        ],
    }],
    required_sections: &["Context", "Decision", "Rationale"],
};

const ADR_SCHEMA: KindSchema = KindSchema {
    kind: RecordKind::Adr,
    filename_pattern: r"^ADR\d{3}-[\w-]+\.md$",
    filename_hint: "ADR<NNN>-<title>.md",
    blocks: &[],
    required_sections: &["Context", "Decision", "Consequences", "Alternatives Considered"],
};

/// Get the declarative schema for a record kind
pub fn schema_for(kind: RecordKind) -> &'static KindSchema {
    match kind {
        RecordKind::Session => &SESSION_SCHEMA,
        RecordKind::Council => &COUNCIL_SCHEMA,
        RecordKind::Adr => &ADR_SCHEMA,
    }
}

/// Validate one record against its kind's schema.
///
/// Pure over its inputs; returns every violation found, in check order.
pub fn validate_record(
    kind: RecordKind,
    filename: &str,
    metadata: &Mapping,
    body: &str,
) -> Vec<String> {
    let schema = schema_for(kind);
    let mut errors = Vec::new();

    let filename_re = Regex::new(schema.filename_pattern).expect("static pattern");
    if !filename_re.is_match(filename) {
        errors.push(format!(
            "Filename must match {}, got: {}",
            schema.filename_hint, filename
        ));
    }

    for block in schema.blocks {
        match root_block(metadata, block.name) {
            None => {
                errors.push(format!("Missing '{}' block in frontmatter", block.name));
            }
            Some(map) => {
                check_field_presence(map, block, &mut errors);
                check_enums(map, block, &mut errors);
                check_timestamps(map, block, &mut errors);
            }
        }
    }

    match kind {
        RecordKind::Session => {
            if let Some(session) = root_block(metadata, "session") {
                structural::session_rules(session, &mut errors);
            }
        }
        RecordKind::Council => {
            if let Some(council) = root_block(metadata, "council") {
                structural::council_rules(council, &mut errors);
            }
        }
        RecordKind::Adr => structural::adr_rules(body, &mut errors),
    }

    for name in schema.required_sections {
        if !has_section(body, name) {
            errors.push(format!("Missing required section: ## {}", name));
        }
    }

    errors
}

fn check_field_presence(map: &Mapping, block: &BlockSpec, errors: &mut Vec<String>) {
    for field in block.fields {
        match map.get(field.name) {
            None => errors.push(format!(
                "Missing required field: {}.{}",
                block.name, field.name
            )),
            Some(value)
                if field.presence == Presence::RequiredNonEmpty && is_empty_value(value) =>
            {
                errors.push(format!(
                    "Empty required field: {}.{}",
                    block.name, field.name
                ));
            }
            _ => {}
        }
    }
}

fn check_enums(map: &Mapping, block: &BlockSpec, errors: &mut Vec<String>) {
    for field in block.fields {
        let Some(ValueCheck::OneOf(allowed)) = field.check else {
            continue;
        };
        let Some(value) = present_value(map, field.name) else {
            continue;
        };
        match scalar_string(value) {
            Some(s) if allowed.contains(&s.as_str()) => {}
            Some(s) => errors.push(format!(
                "Invalid {}.{}: {} (must be one of: {})",
                block.name,
                field.name,
                s,
                allowed.join(", ")
            )),
            None => errors.push(format!(
                "Invalid {}.{}: value is not a string",
                block.name, field.name
            )),
        }
    }
}

fn check_timestamps(map: &Mapping, block: &BlockSpec, errors: &mut Vec<String>) {
    for field in block.fields {
        let Some(ValueCheck::Timestamp) = field.check else {
            continue;
        };
        let Some(value) = present_value(map, field.name) else {
            continue;
        };
        match scalar_string(value) {
            Some(s) if is_valid_timestamp(&s) => {}
            Some(s) => errors.push(format!(
                "Invalid ISO 8601 timestamp in {}.{}: {}",
                block.name, field.name, s
            )),
            None => errors.push(format!(
                "Invalid {}.{}: value is not a string",
                block.name, field.name
            )),
        }
    }
}

/// A value is valid iff it parses as ISO-8601 after substituting a trailing
/// `Z` with `+00:00`. Offset datetimes, naive datetimes, and plain dates
/// all count.
pub fn is_valid_timestamp(value: &str) -> bool {
    let trimmed = value.trim();
    let candidate = match trimmed.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => trimmed.to_string(),
    };

    DateTime::parse_from_rfc3339(&candidate).is_ok()
        || NaiveDateTime::parse_from_str(&candidate, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(&candidate, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").is_ok()
}

/// Line-anchored check for a `## <name>` heading
pub fn has_section(body: &str, name: &str) -> bool {
    let heading = format!("## {}", name);
    body.lines().any(|line| line.trim_end() == heading)
}

/// Look up a root block; only a non-empty mapping counts
fn root_block<'a>(metadata: &'a Mapping, name: &str) -> Option<&'a Mapping> {
    match metadata.get(name) {
        Some(Value::Mapping(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Field value, filtered to present-and-non-empty
fn present_value<'a>(map: &'a Mapping, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|v| !is_empty_value(v))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::split_frontmatter;

    const VALID_SESSION: &str = "\
---
session:
  title: Fix login flow
  status: in_progress
  created: 2025-01-15T09:30:00Z
  last_updated: 2025-01-15T10:00:00Z
  branch: feature/login-fix
orchestration:
  current_task: Wire up the session refresh
---

## Context
Background.

## Current State
- [ ] Refresh endpoint

## Next Steps
- [ ] Ship it
";

    fn validate_str(kind: RecordKind, filename: &str, content: &str) -> Vec<String> {
        let doc = split_frontmatter(content);
        validate_record(kind, filename, &doc.metadata, &doc.body)
    }

    #[test]
    fn test_valid_session_has_no_errors() {
        let errors = validate_str(
            RecordKind::Session,
            "20250115-093000-fix-login.md",
            VALID_SESSION,
        );
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_invalid_status_reports_permitted_values() {
        let content = VALID_SESSION.replace("status: in_progress", "status: done");
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", &content);
        assert_eq!(errors.len(), 1, "expected one error, got: {:?}", errors);
        assert_eq!(
            errors[0],
            "Invalid session.status: done (must be one of: in_progress, paused, completed, archived)"
        );
    }

    #[test]
    fn test_missing_block_reports_once_without_field_errors() {
        let content = "\
---
orchestration:
  current_task: Something
---

## Context
x

## Current State
x

## Next Steps
x
";
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", content);
        assert_eq!(errors, vec!["Missing 'session' block in frontmatter"]);
    }

    #[test]
    fn test_both_blocks_missing_report_independently() {
        let content = "## Context\nx\n## Current State\nx\n## Next Steps\nx\n";
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", content);
        assert_eq!(
            errors,
            vec![
                "Missing 'session' block in frontmatter",
                "Missing 'orchestration' block in frontmatter",
            ]
        );
    }

    #[test]
    fn test_empty_field_distinct_from_missing() {
        let content = VALID_SESSION.replace("title: Fix login flow", "title: \"\"");
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", &content);
        assert_eq!(errors, vec!["Empty required field: session.title"]);
    }

    #[test]
    fn test_filename_pattern_enforced() {
        let errors = validate_str(RecordKind::Session, "Fix-Login.md", VALID_SESSION);
        assert_eq!(
            errors,
            vec!["Filename must match YYYYMMDD-HHMMSS-<description>.md, got: Fix-Login.md"]
        );
    }

    #[test]
    fn test_timestamp_zulu_and_offset_both_accepted() {
        assert!(is_valid_timestamp("2025-01-15T10:00:00Z"));
        assert!(is_valid_timestamp("2025-01-15T10:00:00+00:00"));
        assert!(is_valid_timestamp("2025-01-15T10:00:00"));
        assert!(is_valid_timestamp("2025-01-15"));
        assert!(!is_valid_timestamp("2025-13-01T00:00:00Z"));
        assert!(!is_valid_timestamp("not a date"));
        assert!(!is_valid_timestamp("2025-01-15T25:00:00Z"));
    }

    #[test]
    fn test_invalid_timestamp_reported_per_field() {
        let content = VALID_SESSION.replace(
            "created: 2025-01-15T09:30:00Z",
            "created: yesterday morning",
        );
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", &content);
        assert_eq!(
            errors,
            vec!["Invalid ISO 8601 timestamp in session.created: yesterday morning"]
        );
    }

    #[test]
    fn test_missing_section_reported() {
        let content = VALID_SESSION.replace("## Next Steps", "## Later");
        let errors = validate_str(RecordKind::Session, "20250115-093000-fix-login.md", &content);
        assert_eq!(errors, vec!["Missing required section: ## Next Steps"]);
    }

    #[test]
    fn test_council_presence_only_policy() {
        // decision is present but blank: presence-only fields tolerate it
        let content = "\
---
council:
  topic: Storage engine
  timestamp: 2025-01-15T10:00:00Z
  status: pending
  session: 20250115-093000-fix-login
  participants: [a, b, c, d, e]
  decision:
---

## Context
x

## Decision
x

## Rationale
x
";
        let errors = validate_str(RecordKind::Council, "20250115-100000-storage.md", content);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_council_missing_field_reported() {
        let content = "\
---
council:
  topic: Storage engine
  timestamp: 2025-01-15T10:00:00Z
  status: pending
  participants: [a, b, c, d, e]
  decision: approved the log
---

## Context
x

## Decision
x

## Rationale
x
";
        let errors = validate_str(RecordKind::Council, "20250115-100000-storage.md", content);
        assert_eq!(errors, vec!["Missing required field: council.session"]);
    }
}
