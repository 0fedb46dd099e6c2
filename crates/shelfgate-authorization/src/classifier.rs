//! Principal classification
//!
//! Pure function of the identity facts the authentication layer already
//! established. No side effects and no failure modes: an unauthenticated
//! caller classifies to the anonymous principal.

use shelfgate_core::{Principal, RawIdentity, ADMIN_GROUP};

/// Derive the caller's [`Principal`] for this request.
///
/// The admin flag is computed here, once, from group membership; nothing
/// downstream consults the group set again.
pub fn classify(identity: &RawIdentity) -> Principal {
    if !identity.is_authenticated {
        return Principal::anonymous();
    }
    let Some(id) = identity.id else {
        // Authenticated without a usable id is not a trustworthy state.
        return Principal::anonymous();
    };
    Principal {
        id: Some(id),
        is_authenticated: true,
        is_superuser: identity.is_superuser,
        is_staff: identity.is_staff,
        is_admin: identity.groups.contains(ADMIN_GROUP),
    }
}
