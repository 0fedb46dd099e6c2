//! Request classification enums
//!
//! The mediator is transport-agnostic: a request is described by the
//! HTTP-style method, the kind of view being served, and the intended
//! action. These enums are the whole vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The action a caller intends to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Read a record or collection
    Read,
    /// Create a new record
    Create,
    /// Modify an existing record
    Update,
    /// Remove an existing record
    Delete,
    /// Establish a session
    Login,
}

impl Action {
    /// Stable lowercase name, as stored in the audit log
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Login => "login",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of view a request resolves to
///
/// Authorization rules are keyed on the view kind: deletes get friendly
/// denials, updates get hard denials at object-fetch time, reads are not
/// row-filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    /// Collection listing
    List,
    /// Record creation
    Create,
    /// Record modification
    Update,
    /// Record deletion
    Delete,
    /// Single-record display
    Detail,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::List => "list",
            ViewKind::Create => "create",
            ViewKind::Update => "update",
            ViewKind::Delete => "delete",
            ViewKind::Detail => "detail",
        };
        f.write_str(name)
    }
}

/// HTTP-style request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Whether this method only reads (GET/HEAD)
    pub fn is_read(&self) -> bool {
        matches!(self, RequestMethod::Get | RequestMethod::Head)
    }

    /// The method name in wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
