//! Core types for the shelfgate access-control and audit layer.
//!
//! This crate holds the vocabulary shared by every other shelfgate crate:
//! identifier newtypes, the caller [`Principal`] and its raw trust inputs,
//! the governed [`Record`], request classification enums, and the unified
//! [`GateError`] type.
//!
//! Nothing in this crate makes an authorization decision; it only defines
//! the data those decisions are made over.

pub mod errors;
pub mod types;

pub use errors::{GateError, GateResult};
pub use types::identifiers::{AuditEntryId, EntityType, PrincipalId, RecordId};
pub use types::principal::{Principal, RawIdentity, ADMIN_GROUP};
pub use types::record::Record;
pub use types::request::{Action, RequestMethod, ViewKind};
