//! # Session Commands
//!
//! Sign-in, sign-out, and session restore.
//!
//! ## Session Round Trip
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Round Trip                                   │
//! │                                                                         │
//! │  Auth collaborator                                                      │
//! │  (out of scope)                                                         │
//! │       │  profile payload (JSON)                                         │
//! │       ▼                                                                 │
//! │  sign_in ──► SessionUser::decode ──► SessionState + SessionStore       │
//! │              (the ONE boundary decode; permissions are never           │
//! │               re-validated after this point)                           │
//! │                                                                         │
//! │  App window reload                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restore_session ──► SessionStore::load ──► decode ──► signed in again │
//! │                        (corrupt payload ⇒ cleared, signed out)         │
//! │                                                                         │
//! │  sign_out ──► SessionState::sign_out + SessionStore::clear             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use tracing::{debug, info, warn};

use vireo_core::SessionUser;

use crate::error::ApiError;
use crate::gateway::SessionStore;
use crate::state::SessionState;

/// Signs a user in from the auth collaborator's profile payload.
///
/// ## Behavior
/// This is the single place permissions are decoded (string or object,
/// fail closed per flag). The decoded user is installed as the active
/// principal and persisted to the session store for `restore_session`.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the payload has no usable identity
///   (id/username/role)
pub fn sign_in(
    session: &SessionState,
    store: &dyn SessionStore,
    payload: &Value,
) -> Result<SessionUser, ApiError> {
    debug!("sign_in command");

    let user = SessionUser::decode(payload)
        .ok_or_else(|| ApiError::validation("Sign-in payload is missing a usable identity"))?;

    let serialized = serde_json::to_string(&user)
        .map_err(|e| ApiError::internal(format!("Could not serialize session: {e}")))?;
    store.store(&serialized);
    session.sign_in(user.clone());

    info!(
        username = %user.username,
        role = user.role.as_str(),
        "User signed in"
    );
    Ok(user)
}

/// Rebuilds the session from the session store after a window reload.
///
/// ## Behavior
/// - Empty store ⇒ `Ok(None)`, stays signed out
/// - Corrupt payload ⇒ the slot is cleared and `Ok(None)` is returned;
///   a broken session must degrade to signed-out, never to an error page
pub fn restore_session(
    session: &SessionState,
    store: &dyn SessionStore,
) -> Result<Option<SessionUser>, ApiError> {
    debug!("restore_session command");

    let Some(raw) = store.load() else {
        return Ok(None);
    };

    match SessionUser::decode(&Value::String(raw)) {
        Some(user) => {
            session.sign_in(user.clone());
            debug!(username = %user.username, "Session restored");
            Ok(Some(user))
        }
        None => {
            warn!("Stored session payload is corrupt; clearing it");
            store.clear();
            session.sign_out();
            Ok(None)
        }
    }
}

/// Returns the active principal, if any. Never errors; signed-out is a
/// normal state, not a failure.
pub fn current_user(session: &SessionState) -> Option<SessionUser> {
    session.current()
}

/// Signs the active principal out and clears the stored session.
pub fn sign_out(session: &SessionState, store: &dyn SessionStore) {
    let username = session.with_user(|user| user.username.clone());
    session.sign_out();
    store.clear();
    if let Some(username) = username {
        info!(username = %username, "User signed out");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::MemorySessionStore;
    use serde_json::json;
    use vireo_core::access::{Action, Role, Section};

    fn login_payload() -> Value {
        json!({
            "id": 9,
            "username": "sana",
            "fullName": "Sana Malik",
            "role": "manager",
            "permissions": { "customers": { "view": true, "edit": true } }
        })
    }

    #[test]
    fn test_sign_in_installs_and_persists() {
        let session = SessionState::new();
        let store = MemorySessionStore::new();

        let user = sign_in(&session, &store, &login_payload()).unwrap();
        assert_eq!(user.role, Role::Manager);
        assert!(session.has_permission(Section::Customers, Action::Edit));
        assert!(store.load().is_some());
    }

    #[test]
    fn test_sign_in_rejects_garbage() {
        let session = SessionState::new();
        let store = MemorySessionStore::new();

        let err = sign_in(&session, &store, &json!({ "role": "manager" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!session.is_signed_in());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_restore_round_trip() {
        let session = SessionState::new();
        let store = MemorySessionStore::new();
        sign_in(&session, &store, &login_payload()).unwrap();

        // Simulate a window reload: fresh session state, same store
        let reloaded = SessionState::new();
        let user = restore_session(&reloaded, &store).unwrap().unwrap();
        assert_eq!(user.username, "sana");
        assert!(reloaded.has_permission(Section::Customers, Action::View));
    }

    #[test]
    fn test_restore_empty_store() {
        let session = SessionState::new();
        let store = MemorySessionStore::new();
        assert!(restore_session(&session, &store).unwrap().is_none());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_restore_corrupt_payload_degrades_to_signed_out() {
        let session = SessionState::new();
        let store = MemorySessionStore::with_payload("}{ definitely not json");

        assert!(restore_session(&session, &store).unwrap().is_none());
        assert!(!session.is_signed_in());
        assert!(store.load().is_none(), "corrupt slot should be cleared");
    }

    #[test]
    fn test_sign_out_clears_both() {
        let session = SessionState::new();
        let store = MemorySessionStore::new();
        sign_in(&session, &store, &login_payload()).unwrap();

        sign_out(&session, &store);
        assert!(!session.is_signed_in());
        assert!(store.load().is_none());
        assert!(current_user(&session).is_none());
    }
}
