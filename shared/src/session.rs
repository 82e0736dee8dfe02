use crate::config::Config;
use crate::constants::STORAGE_TOKEN;
use crate::routes::Route;

/// Minimal string storage. The browser build is backed by `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Auth token plus endpoint configuration, persisted across reloads.
#[derive(Debug, Clone)]
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> String {
        self.store.get(STORAGE_TOKEN).unwrap_or_default()
    }

    pub fn has_token(&self) -> bool {
        !self.token().is_empty()
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(STORAGE_TOKEN, token);
    }

    pub fn clear(&self) {
        self.store.remove(STORAGE_TOKEN);
    }

    /// Drops the token. Returns `true` only when one was present.
    pub fn expire(&self) -> bool {
        let had_token = self.has_token();
        if had_token {
            self.clear();
        }
        had_token
    }

    /// Unauthorized response seen while `current_path` is on screen. Clears
    /// the token, whether or not this tab still had one, and tells if the
    /// user must be sent to `/login`. Once a public page is showing, later
    /// responses of the same burst leave it alone.
    pub fn reject(&self, current_path: &str) -> bool {
        self.expire();
        !Route::parse(current_path).is_some_and(|route| route.is_public())
    }

    pub fn config(&self) -> Config {
        Config::load(&self.store)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn empty_on_first_load() {
        let session = Session::new(MemoryStore::default());
        assert_eq!(session.token(), "");
        assert!(!session.has_token());
    }

    #[test]
    fn token_survives_new_session_over_same_store() {
        let store = MemoryStore::default();
        Session::new(&store).set_token("abc");
        assert_eq!(Session::new(&store).token(), "abc");
    }

    #[test]
    fn expire_reports_once() {
        let session = Session::new(MemoryStore::default());
        session.set_token("abc");
        assert!(session.expire());
        assert!(!session.has_token());
        assert!(!session.expire());
    }

    #[test]
    fn rejected_on_private_page_redirects_once() {
        let session = Session::new(MemoryStore::default());
        session.set_token("abc");
        assert!(session.reject("/contacts"));
        assert!(!session.has_token());
        // the redirect has put /login on screen
        assert!(!session.reject("/login"));
    }

    #[test]
    fn rejected_after_token_vanished_still_redirects() {
        // token removed by another tab
        let session = Session::new(MemoryStore::default());
        assert!(session.reject("/campaigns/7"));
        assert!(session.reject("/nowhere"));
        assert!(!session.reject("/signup"));
    }
}
