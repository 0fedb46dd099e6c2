//! Ownership policy and its evaluation

pub mod evaluation;

pub use evaluation::{
    authorize, authorize_bulk, read_only_for, Denial, DenialKind, Verdict, READ_ONLY_MESSAGE,
};
