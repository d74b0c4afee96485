//! Explicit session context. The original client read `token`/`userId`/
//! `role` out of storage ad hoc from every screen; here the triple has one
//! owner with a defined lifecycle: established at login (or restored at
//! startup), cleared at logout.

use uuid::Uuid;

use crate::models::user::Role;
use crate::storage::{keys, LocalStore, StoreError};

/// The authenticated session. Constructed only by `login`/`restore`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub role: Role,
}

impl Session {
    /// Restores a session from the local store. Returns `None` when any of
    /// the three keys is missing or unreadable — a torn write from a
    /// previous run is treated as logged out, not as an error.
    pub fn restore(store: &LocalStore) -> Result<Option<Self>, StoreError> {
        let token: Option<String> = store.get(keys::TOKEN)?;
        let user_id: Option<Uuid> = store.get(keys::USER_ID)?;
        let role: Option<Role> = store.get(keys::ROLE)?;
        Ok(match (token, user_id, role) {
            (Some(token), Some(user_id), Some(role)) => Some(Session {
                token,
                user_id,
                role,
            }),
            _ => None,
        })
    }

    /// Persists the session under the original client's storage keys.
    pub fn persist(&self, store: &LocalStore) -> Result<(), StoreError> {
        store.set(keys::TOKEN, &self.token)?;
        store.set(keys::USER_ID, &self.user_id)?;
        store.set(keys::ROLE, &self.role)?;
        Ok(())
    }

    /// Logout: removes the session keys. Recommendation caches are left
    /// alone; they belong to the device, not the account.
    pub fn clear(store: &LocalStore) -> Result<(), StoreError> {
        store.remove(keys::TOKEN)?;
        store.remove(keys::USER_ID)?;
        store.remove(keys::ROLE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn sample_session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user_id: Uuid::new_v4(),
            role: Role::Company,
        }
    }

    #[test]
    fn test_persist_then_restore_round_trips() {
        let (_dir, store) = temp_store();
        let session = sample_session();
        session.persist(&store).unwrap();

        let restored = Session::restore(&store).unwrap().unwrap();
        assert_eq!(restored.token, session.token);
        assert_eq!(restored.user_id, session.user_id);
        assert_eq!(restored.role, session.role);
    }

    #[test]
    fn test_restore_with_no_keys_is_logged_out() {
        let (_dir, store) = temp_store();
        assert!(Session::restore(&store).unwrap().is_none());
    }

    #[test]
    fn test_restore_with_partial_keys_is_logged_out() {
        let (_dir, store) = temp_store();
        store.set(keys::TOKEN, &"half-written".to_string()).unwrap();
        assert!(Session::restore(&store).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_session_but_not_caches() {
        let (_dir, store) = temp_store();
        sample_session().persist(&store).unwrap();
        store
            .set(keys::RECOMMENDED_APPLICANTS, &vec!["x".to_string()])
            .unwrap();

        Session::clear(&store).unwrap();

        assert!(Session::restore(&store).unwrap().is_none());
        let cache: Option<Vec<String>> = store.get(keys::RECOMMENDED_APPLICANTS).unwrap();
        assert!(cache.is_some());
    }
}
