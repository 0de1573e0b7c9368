// ── Domain model ──

pub mod record;

pub use record::{Interests, Record, RecordId};
