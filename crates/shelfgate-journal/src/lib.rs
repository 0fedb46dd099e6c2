//! Append-only audit trail for shelfgate
//!
//! Every mediated admin action leaves one [`AuditEntry`]. The log is
//! write-once: no update or delete operation exists on it, and appending
//! is best-effort with respect to the governed action — a failing audit
//! store must never fail the operation that triggered the entry. The
//! [`AuditRecorder`] is the one place where that contract is visible: it
//! discards the append `Result` at exactly one call site.

pub mod entry;
pub mod recorder;
pub mod store;

pub use entry::{AuditAction, AuditEntry, NewAuditEntry};
pub use recorder::AuditRecorder;
pub use store::{AuditStore, MemoryAuditStore};
