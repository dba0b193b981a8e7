//! Audit trail of user mutations
//!
//! Every engine mutation (import, assign, rename, correct, ignore, unignore)
//! appends one [`AuditEntry`] to `audit.log` as a JSON line. The trail is
//! separate from diagnostic logging; failing to write it never fails the
//! mutation itself.

mod entry;
mod logger;

pub use entry::{Action, AuditEntry};
pub use logger::AuditLogger;
