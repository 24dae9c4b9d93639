use crate::storage::{KeyValueStore, USER_ID_KEY};
use uuid::Uuid;

/// Per-tab user id sent with every chat request.
///
/// Read from session storage once at start-up and generated (UUID v4) when
/// missing or empty. Any other stored string is reused as is. It never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionIdentity {
    user_id: String,
}

impl SessionIdentity {
    pub fn load_or_create(store: &dyn KeyValueStore) -> Self {
        if let Some(existing) = store.get(USER_ID_KEY)
            && !existing.is_empty()
        {
            tracing::debug!(user_id = %existing, "reusing session id");
            return Self { user_id: existing };
        }

        let user_id = Uuid::new_v4().to_string();
        if let Err(err) = store.set(USER_ID_KEY, &user_id) {
            // Still usable for this page, just not shared with a reload.
            tracing::warn!("failed to store session id: {err}");
        }
        tracing::info!(user_id = %user_id, "created session id");
        Self { user_id }
    }

    pub fn as_str(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn generates_and_stores_uuid_when_missing() {
        let store = MemoryStore::new();
        let identity = SessionIdentity::load_or_create(&store);

        assert!(Uuid::parse_str(identity.as_str()).is_ok());
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some(identity.as_str()));
    }

    #[test]
    fn reuses_existing_id() {
        let store = MemoryStore::with_entry(USER_ID_KEY, "abc-123");
        let identity = SessionIdentity::load_or_create(&store);
        assert_eq!(identity.as_str(), "abc-123");
    }

    #[test]
    fn stable_across_loads_in_one_session() {
        let store = MemoryStore::new();
        let first = SessionIdentity::load_or_create(&store);
        let second = SessionIdentity::load_or_create(&store);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_stored_id_is_replaced() {
        let store = MemoryStore::with_entry(USER_ID_KEY, "");
        let identity = SessionIdentity::load_or_create(&store);

        assert!(Uuid::parse_str(identity.as_str()).is_ok());
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some(identity.as_str()));
    }

    #[test]
    fn whitespace_stored_id_is_kept() {
        let store = MemoryStore::with_entry(USER_ID_KEY, "  ");
        let identity = SessionIdentity::load_or_create(&store);

        assert_eq!(identity.as_str(), "  ");
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("  "));
    }
}
