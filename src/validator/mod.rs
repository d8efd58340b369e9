pub mod compat;
pub mod schema;
pub mod structural;

pub use compat::CompatScanner;
pub use schema::{schema_for, validate_record, KindSchema};
