use serde::{Deserialize, Serialize};

/// Accumulated findings for a single document.
///
/// Errors fail a run; warnings never do. Both lists preserve the order in
/// which checks emitted them, so a caller can assert on the full sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Diagnostics {
    /// Create an empty diagnostics set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (warnings do not count)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Merge another set, errors first within each list
    pub fn merge(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        assert!(Diagnostics::new().is_valid());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diag = Diagnostics::new();
        diag.push_warning("advisory only");
        assert!(diag.is_valid());
        assert!(diag.has_warnings());
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut a = Diagnostics::new();
        a.push_error("first");
        let mut b = Diagnostics::new();
        b.push_error("second");
        b.push_warning("note");
        a.merge(b);
        assert_eq!(a.errors, vec!["first", "second"]);
        assert_eq!(a.warnings, vec!["note"]);
    }
}
