use futures_signals::signal::Mutable;
use once_cell::sync::Lazy;
use web_sys::Storage;

use shared::session::{KeyValueStore, Session};

pub static SIGNED_IN: Lazy<Mutable<bool>> = Lazy::new(|| Mutable::new(false));

/// `window.localStorage`; every call fails soft when storage is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = storage() {
            if let Err(err) = s.set_item(key, value) {
                log::error!("storage set {key}: {:?}", err);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = storage() {
            s.remove_item(key).ok();
        }
    }
}

pub fn session() -> Session<LocalStore> {
    Session::new(LocalStore)
}

pub fn refresh_signed_in() {
    SIGNED_IN.set_neq(session().has_token());
}
