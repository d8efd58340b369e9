//! Section and decision-block scanning
//!
//! A line-scanning state machine over the markdown subset records use:
//! `## ` section headings, `### ` decision headings, and `**Label**: value`
//! field lines. Scanning is line-anchored throughout, so block boundaries
//! are exact and independent of any regex engine's multiline semantics.

use crate::models::Decision;
use regex::Regex;

/// Extract the text of a named top-level section.
///
/// Matches a `## <name>` heading at the start of a line (case-sensitive,
/// trailing whitespace ignored) and collects everything up to the next
/// `## ` heading or end of input. Returns `None` when the section is
/// absent or empty after trimming, so callers can tell "missing" from
/// "present but blank" by pairing this with the decision parser.
pub fn extract_section(body: &str, name: &str) -> Option<String> {
    let heading = format!("## {}", name);
    let mut inside = false;
    let mut collected: Vec<&str> = Vec::new();

    for line in body.lines() {
        if inside {
            if line.starts_with("## ") {
                break;
            }
            collected.push(line);
        } else if line.trim_end() == heading {
            inside = true;
        }
    }

    if !inside {
        return None;
    }

    let text = collected.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse decision blocks out of an extracted section.
///
/// Each block opens with `### [Decision <N>: ]<title>` and runs to the next
/// `### ` heading or end of text. Within a block, `**Decision**:`,
/// `**Rationale**:` and `**Council**:` lines open a field whose value spans
/// until the next `**`-led line or the end of the block. Blocks missing a
/// title or decision text are dropped without comment.
pub fn parse_decisions(text: &str) -> Vec<Decision> {
    let number_prefix = Regex::new(r"^Decision\s+\d+:\s+").expect("static pattern");

    let mut decisions = Vec::new();
    let mut current: Option<DecisionDraft> = None;

    for line in text.lines() {
        if let Some(raw_title) = subblock_title(line) {
            if let Some(draft) = current.take() {
                if let Some(decision) = draft.finish() {
                    decisions.push(decision);
                }
            }
            let title = number_prefix.replace(raw_title, "").trim().to_string();
            current = Some(DecisionDraft::new(title));
        } else if let Some(draft) = current.as_mut() {
            draft.feed(line);
        }
    }

    if let Some(draft) = current {
        if let Some(decision) = draft.finish() {
            decisions.push(decision);
        }
    }

    decisions
}

/// Recognize a `### ` heading line and return its raw title text
fn subblock_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("###")?;
    if rest.starts_with(' ') || rest.starts_with('\t') {
        Some(rest.trim())
    } else {
        None
    }
}

/// Field currently being captured inside a decision block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Decision,
    Rationale,
    Council,
}

/// In-progress decision block
struct DecisionDraft {
    title: String,
    decision: Vec<String>,
    rationale: Vec<String>,
    council: Vec<String>,
    active: Option<FieldState>,
}

impl DecisionDraft {
    fn new(title: String) -> Self {
        Self {
            title,
            decision: Vec::new(),
            rationale: Vec::new(),
            council: Vec::new(),
            active: None,
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with("**") {
            // Any bold-led line ends the running capture; only the known
            // labels open a new one.
            self.active = match split_label(line) {
                Some(("Decision", rest)) => {
                    self.decision.push(rest.to_string());
                    Some(FieldState::Decision)
                }
                Some(("Rationale", rest)) => {
                    self.rationale.push(rest.to_string());
                    Some(FieldState::Rationale)
                }
                Some(("Council", rest)) => {
                    self.council.push(rest.to_string());
                    Some(FieldState::Council)
                }
                _ => None,
            };
        } else {
            match self.active {
                Some(FieldState::Decision) => self.decision.push(line.to_string()),
                Some(FieldState::Rationale) => self.rationale.push(line.to_string()),
                Some(FieldState::Council) => self.council.push(line.to_string()),
                None => {}
            }
        }
    }

    fn finish(self) -> Option<Decision> {
        let decision = Decision {
            title: self.title,
            decision: join_field(self.decision),
            rationale: join_field(self.rationale),
            council: join_field(self.council),
        };
        if decision.is_complete() {
            Some(decision)
        } else {
            None
        }
    }
}

/// Split a `**Label**: value` line into label and first value fragment
fn split_label(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("**")?;
    let (label, after) = rest.split_once("**:")?;
    Some((label, after.trim_start()))
}

fn join_field(lines: Vec<String>) -> String {
    lines.join("\n").trim().to_string()
}
