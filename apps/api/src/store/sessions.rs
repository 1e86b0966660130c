//! Per-session store registry. Each editing session owns an independent
//! in-memory document; there is no shared mutable state between sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::store::ids::IdGenerator;
use crate::store::PortfolioStore;

#[derive(Clone)]
pub struct SessionManager {
    stores: Arc<RwLock<HashMap<String, Arc<PortfolioStore>>>>,
    ids: Arc<dyn IdGenerator>,
}

impl SessionManager {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        SessionManager {
            stores: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    /// Returns the session's store, creating it with the seed document on
    /// first access.
    pub fn get_or_create(&self, session: &str) -> Arc<PortfolioStore> {
        if let Some(store) = self.get(session) {
            return store;
        }
        let mut stores = self.stores.write().expect("session map lock poisoned");
        // Re-check under the write lock; another request may have won.
        stores
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(PortfolioStore::seeded(self.ids.clone())))
            .clone()
    }

    pub fn get(&self, session: &str) -> Option<Arc<PortfolioStore>> {
        self.stores
            .read()
            .expect("session map lock poisoned")
            .get(session)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ids::SequentialIds;

    #[test]
    fn test_get_or_create_seeds_once_and_is_stable() {
        let sessions = SessionManager::new(Arc::new(SequentialIds::new()));
        let a = sessions.get_or_create("alpha");
        assert_eq!(a.snapshot().projects.len(), 2);

        a.set_name("Changed".to_string());
        let again = sessions.get_or_create("alpha");
        assert_eq!(again.snapshot().name, "Changed");
    }

    #[test]
    fn test_sessions_are_independent() {
        let sessions = SessionManager::new(Arc::new(SequentialIds::new()));
        let a = sessions.get_or_create("alpha");
        let b = sessions.get_or_create("beta");

        a.set_name("Alice".to_string());
        assert_ne!(b.snapshot().name, "Alice");
    }

    #[test]
    fn test_get_does_not_create() {
        let sessions = SessionManager::new(Arc::new(SequentialIds::new()));
        assert!(sessions.get("ghost").is_none());
        sessions.get_or_create("ghost");
        assert!(sessions.get("ghost").is_some());
    }
}
