//! Request mediation for shelfgate
//!
//! The mediator is the only path by which a request touches governed
//! records. Every operation walks the same states:
//!
//! ```text
//! Received → Classified → Authorized → [Executed] → [Audited] → Responded
//! ```
//!
//! A denial short-circuits straight to the response: nothing executes and
//! nothing is audited beyond the denial message. On allow, the operation
//! is delegated to the [`Storage`] collaborator and then recorded
//! best-effort through the journal. Friendly denials are *values*
//! ([`Outcome::DeniedFriendly`]); hard denials and authentication failures
//! are errors.

pub mod mediator;
pub mod memory;
pub mod request;
pub mod storage;

pub use mediator::RequestMediator;
pub use memory::MemoryStorage;
pub use request::{BulkDeleteReport, DeleteDisposition, MediatedRequest, Outcome};
pub use storage::{DeleteError, FieldMap, RecordDraft, RecordFilter, Storage};
