//! Ownership-based authorization for shelfgate
//!
//! The single source of truth for "may this principal perform this action
//! on this record". Two entry points cover everything the mediator needs:
//!
//! - [`classify`] turns the raw identity facts into a [`Principal`] with a
//!   precomputed admin flag;
//! - [`authorize`] / [`authorize_bulk`] return a [`Verdict`] for single and
//!   batch operations.
//!
//! The policy is deliberately a pair of free functions rather than behavior
//! mixed into each operation, so it can be tested without any mediator or
//! storage in the picture.

pub mod classifier;
pub mod errors;
pub mod policy;

pub use classifier::classify;
pub use policy::evaluation::{
    authorize, authorize_bulk, read_only_for, Denial, DenialKind, Verdict, READ_ONLY_MESSAGE,
};
