//! Core type definitions shared across the shelfgate crates

pub mod identifiers;
pub mod principal;
pub mod record;
pub mod request;
