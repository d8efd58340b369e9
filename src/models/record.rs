use serde::{Deserialize, Serialize};

/// Kind of work-tracking record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Working session log (`YYYYMMDD-HHMMSS-<slug>.md`)
    Session,
    /// Council decision meeting (`YYYYMMDD-HHMMSS-<topic>.md`)
    Council,
    /// Architecture Decision Record (`ADR<NNN>-<slug>.md`)
    Adr,
}

impl RecordKind {
    /// Get display name for record kind
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Session => "session",
            RecordKind::Council => "council",
            RecordKind::Adr => "ADR",
        }
    }
}

/// A single decision recovered from a record body.
///
/// Produced transiently by the section extractor and consumed by the
/// report formatter. `rationale` and `council` are optional; empty string
/// means the field was absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub title: String,
    pub decision: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub council: String,
}

impl Decision {
    /// A decision is usable only when both title and decision text exist
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.decision.trim().is_empty()
    }
}
