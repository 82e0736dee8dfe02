use crate::constants::{DEFAULT_API_BASE, DEFAULT_EVENTS_URL, STORAGE_API_BASE, STORAGE_EVENTS_URL};
use crate::session::KeyValueStore;

/// Endpoints the client talks to. Both can be overridden from local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub events_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            events_url: DEFAULT_EVENTS_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        Self {
            api_base: normalize(store.get(STORAGE_API_BASE), DEFAULT_API_BASE),
            events_url: normalize(store.get(STORAGE_EVENTS_URL), DEFAULT_EVENTS_URL),
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    pub fn events_url_for(&self, token: &str) -> String {
        format!("{}?token={}", self.events_url, urlencoding::encode(token))
    }
}

fn normalize(value: Option<String>, default: &str) -> String {
    let value = value.unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::MemoryStore;

    #[test]
    fn defaults_without_overrides() {
        let config = Config::load(&MemoryStore::default());
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url("/api/contacts"), "http://localhost:3000/api/contacts");
    }

    #[test]
    fn overrides_drop_trailing_slash() {
        let store = MemoryStore::default();
        store.set(STORAGE_API_BASE, "https://api.example.com/");
        store.set(STORAGE_EVENTS_URL, "https://push.example.com/events");
        let config = Config::load(&store);
        assert_eq!(config.api_url("/api/templates"), "https://api.example.com/api/templates");
        assert_eq!(config.events_url, "https://push.example.com/events");
    }

    #[test]
    fn events_url_encodes_token() {
        let config = Config::default();
        assert_eq!(
            config.events_url_for("a b/c"),
            "http://localhost:3000/events?token=a%20b%2Fc"
        );
    }
}
