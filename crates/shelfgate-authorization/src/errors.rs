//! Error handling using the unified shelfgate error system

pub use shelfgate_core::{GateError, GateResult};

/// Policy result type alias using the unified error system
pub type PolicyResult<T> = GateResult<T>;
