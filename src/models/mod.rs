pub mod diagnostics;
pub mod record;

pub use diagnostics::Diagnostics;
pub use record::{Decision, RecordKind};
