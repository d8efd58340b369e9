//! Tracker-export compatibility scanner
//!
//! Line-by-line scan for patterns that break when a record body is synced
//! to the external issue tracker. Hard incompatibilities (emoji progress
//! markers, local paths) are errors; stylistic nudges are warnings and
//! never block a run. The scan is independent of heading structure.

use crate::models::Diagnostics;
use regex::Regex;

/// Internal record storage paths that must not leak into exports
const STORAGE_PATHS: &[&str] = &[".trackd/sessions/", ".trackd/councils/"];

pub struct CompatScanner {
    checkbox_line: Regex,
    emoji: Regex,
    emoji_bullet: Regex,
    home_path: Regex,
    phase_terms: Vec<Regex>,
    internal_refs: Vec<Regex>,
    issue_with_title: Regex,
    checkbox_item: Regex,
    bullet_item: Regex,
}

impl CompatScanner {
    pub fn new() -> Self {
        Self {
            checkbox_line: Regex::new(r"^[-*]\s*\[.\]").expect("static pattern"),
            emoji: Regex::new(r"[\x{1F300}-\x{1F9FF}\x{1FA00}-\x{1FAFF}]")
                .expect("static pattern"),
            emoji_bullet: Regex::new(r"^[\x{1F300}-\x{1F9FF}]").expect("static pattern"),
            home_path: Regex::new(r"(/Users|/home)/[^/]+/").expect("static pattern"),
            phase_terms: [
                r"(?i)\bPhase\s+\d",
                r"(?i)\bStage\s+\d",
                r"(?i)\bWeek\s+\d",
                r"(?i)\bSprint\s+\d",
            ]
            .iter()
            .map(|p| Regex::new(p).expect("static pattern"))
            .collect(),
            internal_refs: [
                r"(?i)\bspawned\s+(backend|frontend|dba|devops|testing)",
                r"(?i)\bcouncil\s+decision",
                r"(?i)\bsession\s+file",
            ]
            .iter()
            .map(|p| Regex::new(p).expect("static pattern"))
            .collect(),
            issue_with_title: Regex::new(r"[A-Z]+-\d+\s+[A-Z]").expect("static pattern"),
            checkbox_item: Regex::new(r"^[-*]\s*\[[ x]\]").expect("static pattern"),
            bullet_item: Regex::new(r"^[-*]\s+[^\[\]]").expect("static pattern"),
        }
    }

    /// Scan body text; line numbers in messages are 1-indexed.
    pub fn scan(&self, content: &str) -> Diagnostics {
        let mut diag = Diagnostics::new();
        let mut checkbox_count = 0usize;
        let mut bullet_count = 0usize;

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;

            if self.checkbox_line.is_match(line) && self.emoji.is_match(line) {
                diag.push_error(format!(
                    "Line {}: Emoji in progress list (use checkboxes only)",
                    lineno
                ));
            }

            if self.emoji_bullet.is_match(line) {
                diag.push_error(format!(
                    "Line {}: Emoji bullet (use Markdown checkboxes)",
                    lineno
                ));
            }

            if STORAGE_PATHS.iter().any(|p| line.contains(p)) {
                diag.push_error(format!(
                    "Line {}: Local file reference (remove before tracker sync)",
                    lineno
                ));
            }

            if self.home_path.is_match(line) {
                diag.push_error(format!("Line {}: Absolute path (use relative paths)", lineno));
            }

            for pattern in &self.phase_terms {
                if pattern.is_match(line) {
                    diag.push_warning(format!(
                        "Line {}: Avoid phase/stage terminology in tracker exports",
                        lineno
                    ));
                }
            }

            for pattern in &self.internal_refs {
                if pattern.is_match(line) {
                    diag.push_warning(format!(
                        "Line {}: Internal process reference (remove before export)",
                        lineno
                    ));
                }
            }

            if self.issue_with_title.is_match(line) {
                diag.push_warning(format!(
                    "Line {}: Issue ID may include title (tracker auto-expands)",
                    lineno
                ));
            }

            if self.checkbox_item.is_match(line) {
                checkbox_count += 1;
            }
            if self.bullet_item.is_match(line) {
                bullet_count += 1;
            }
        }

        if bullet_count > 0 && checkbox_count == 0 {
            diag.push_warning(
                "No checkboxes found - consider using '- [ ]' for progress tracking".to_string(),
            );
        }

        diag
    }
}

impl Default for CompatScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot scan with a fresh scanner
pub fn scan(content: &str) -> Diagnostics {
    CompatScanner::new().scan(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_clean() {
        let content = "\
## Current State

- [x] Wire the endpoint
- [ ] Add retries
";
        let diag = scan(content);
        assert!(diag.errors.is_empty(), "errors: {:?}", diag.errors);
        assert!(diag.warnings.is_empty(), "warnings: {:?}", diag.warnings);
    }

    #[test]
    fn test_emoji_in_progress_list_is_error() {
        let content = "- [x] Done \u{1F389}\n";
        let diag = scan(content);
        assert_eq!(
            diag.errors,
            vec!["Line 1: Emoji in progress list (use checkboxes only)"]
        );
    }

    #[test]
    fn test_emoji_bullet_is_error() {
        let content = "\u{1F680} Launch the thing\n";
        let diag = scan(content);
        assert_eq!(diag.errors, vec!["Line 1: Emoji bullet (use Markdown checkboxes)"]);
    }

    #[test]
    fn test_local_storage_reference_is_error() {
        let content = "See .trackd/sessions/20250115-093000-fix-login.md\n";
        let diag = scan(content);
        assert_eq!(
            diag.errors,
            vec!["Line 1: Local file reference (remove before tracker sync)"]
        );
    }

    #[test]
    fn test_home_paths_are_errors() {
        for line in ["/Users/sam/repo/notes.md here", "/home/sam/repo/notes.md here"] {
            let diag = scan(line);
            assert_eq!(
                diag.errors,
                vec!["Line 1: Absolute path (use relative paths)"],
                "line: {}",
                line
            );
        }
    }

    #[test]
    fn test_phase_terminology_is_warning() {
        let diag = scan("Start phase 2 next week\n");
        assert!(diag.errors.is_empty());
        assert_eq!(
            diag.warnings,
            vec!["Line 1: Avoid phase/stage terminology in tracker exports"]
        );
    }

    #[test]
    fn test_internal_process_reference_is_warning() {
        let diag = scan("Recorded as a council decision yesterday\n");
        assert_eq!(
            diag.warnings,
            vec!["Line 1: Internal process reference (remove before export)"]
        );
    }

    #[test]
    fn test_issue_id_with_title_is_warning() {
        let diag = scan("Tracked as ENG-142 Login refresh\n");
        assert_eq!(
            diag.warnings,
            vec!["Line 1: Issue ID may include title (tracker auto-expands)"]
        );
    }

    #[test]
    fn test_bullets_without_checkboxes_is_warning() {
        let diag = scan("- first item\n- second item\n");
        assert_eq!(
            diag.warnings,
            vec!["No checkboxes found - consider using '- [ ]' for progress tracking"]
        );
    }

    #[test]
    fn test_line_numbers_are_one_indexed() {
        let content = "clean line\n\nStage 3 kickoff\n";
        let diag = scan(content);
        assert_eq!(
            diag.warnings,
            vec!["Line 3: Avoid phase/stage terminology in tracker exports"]
        );
    }

    #[test]
    fn test_scan_is_idempotent_on_clean_output() {
        // Text already free of flagged patterns stays clean on a re-scan
        let content = "## Current State\n\n- [ ] Add retries\n";
        let first = scan(content);
        assert!(first.is_valid() && !first.has_warnings());
        let second = scan(content);
        assert!(second.is_valid() && !second.has_warnings());
    }
}
