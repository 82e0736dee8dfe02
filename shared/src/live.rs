use serde::Deserialize;

use crate::constants::RECONNECT_DELAY_MS;
use crate::types::ChatMessage;

/// Push payloads from the events endpoint, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveEvent {
    Message {
        #[serde(rename = "waId")]
        wa_id: String,
        message: ChatMessage,
    },
    Campaign {
        #[serde(rename = "campaignId")]
        campaign_id: serde_json::Value,
        status: String,
    },
    #[serde(other)]
    Unknown,
}

impl LiveEvent {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Campaign ids in push events may be numeric; compare them as strings.
pub fn campaign_id_text(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    ReconnectPending,
}

/// Lifecycle of the single push connection.
///
/// The browser glue owns the actual `EventSource` and timer; every decision
/// about whether to connect, retry or stay down is taken here.
#[derive(Debug, Clone, Default)]
pub struct LiveLink {
    state: LinkState,
    closed: bool,
    attempts: u32,
    generation: u64,
}

impl LiveLink {
    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Bumped on every open, failure and close. A reconnect timer only acts
    /// when the generation it was armed with is still current.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests a connection. Refused without a token.
    pub fn open(&mut self, has_token: bool) -> bool {
        if !has_token {
            self.state = LinkState::Disconnected;
            return false;
        }
        self.closed = false;
        self.generation += 1;
        self.state = LinkState::Connecting;
        true
    }

    pub fn opened(&mut self) {
        if self.state == LinkState::Connecting {
            self.state = LinkState::Connected;
            self.attempts = 0;
        }
    }

    /// Connection error: returns the delay before the next attempt, or
    /// `None` when the link was closed on purpose.
    pub fn failed(&mut self) -> Option<u32> {
        if self.closed {
            self.state = LinkState::Disconnected;
            return None;
        }
        self.state = LinkState::ReconnectPending;
        self.generation += 1;
        self.attempts = self.attempts.saturating_add(1);
        Some(RECONNECT_DELAY_MS)
    }

    /// Reconnect timer armed at `generation` fired.
    pub fn retry(&mut self, generation: u64, has_token: bool) -> bool {
        if self.closed || self.state != LinkState::ReconnectPending || generation != self.generation {
            return false;
        }
        if !has_token {
            self.state = LinkState::Disconnected;
            return false;
        }
        self.state = LinkState::Connecting;
        true
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
        self.state = LinkState::Disconnected;
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn needs_token_to_open() {
        let mut link = LiveLink::default();
        assert!(!link.open(false));
        assert_eq!(link.state(), LinkState::Disconnected);
        assert!(link.open(true));
        assert_eq!(link.state(), LinkState::Connecting);
        link.opened();
        assert_eq!(link.state(), LinkState::Connected);
    }

    #[test]
    fn error_schedules_fixed_delay_forever() {
        let mut link = LiveLink::default();
        link.open(true);
        for attempt in 1..=50 {
            assert_eq!(link.failed(), Some(RECONNECT_DELAY_MS));
            assert_eq!(link.state(), LinkState::ReconnectPending);
            assert_eq!(link.attempts(), attempt);
            assert!(link.retry(link.generation(), true));
            assert_eq!(link.state(), LinkState::Connecting);
        }
    }

    #[test]
    fn retry_skipped_once_token_is_gone() {
        let mut link = LiveLink::default();
        link.open(true);
        link.opened();
        assert!(link.failed().is_some());
        assert!(!link.retry(link.generation(), false));
        assert_eq!(link.state(), LinkState::Disconnected);
    }

    #[test]
    fn close_cancels_pending_reconnect() {
        let mut link = LiveLink::default();
        link.open(true);
        link.opened();
        link.close();
        assert_eq!(link.failed(), None);
        assert!(!link.retry(link.generation(), true));

        let mut link = LiveLink::default();
        link.open(true);
        assert!(link.failed().is_some());
        let armed = link.generation();
        link.close();
        assert!(!link.retry(armed, true));
        assert_eq!(link.state(), LinkState::Disconnected);
    }

    #[test]
    fn reopen_after_close() {
        let mut link = LiveLink::default();
        link.open(true);
        link.close();
        assert!(link.open(true));
        assert_eq!(link.failed(), Some(RECONNECT_DELAY_MS));
    }

    #[test]
    fn timer_from_previous_session_is_ignored() {
        let mut link = LiveLink::default();
        link.open(true);
        assert!(link.failed().is_some());
        let stale = link.generation();

        // logout and login again before the timer fires, then fail anew
        link.close();
        link.open(true);
        assert!(link.failed().is_some());
        let fresh = link.generation();

        assert!(!link.retry(stale, true));
        assert_eq!(link.state(), LinkState::ReconnectPending);
        assert!(link.retry(fresh, true));
        assert_eq!(link.state(), LinkState::Connecting);
    }

    #[test]
    fn decode_events() {
        let message = LiveEvent::parse(r#"{"type":"message","waId":"123","message":{"text":"hi"}}"#).unwrap();
        match message {
            LiveEvent::Message { wa_id, message } => {
                assert_eq!(wa_id, "123");
                assert_eq!(message.body(), "hi");
            }
            other => panic!("unexpected {other:?}"),
        }

        let campaign = LiveEvent::parse(r#"{"type":"campaign","campaignId":7,"status":"running"}"#).unwrap();
        assert_eq!(
            campaign,
            LiveEvent::Campaign { campaign_id: json!(7), status: "running".into() }
        );
        if let LiveEvent::Campaign { campaign_id, .. } = campaign {
            assert_eq!(campaign_id_text(&campaign_id), "7");
        }

        assert_eq!(LiveEvent::parse(r#"{"type":"ping"}"#).unwrap(), LiveEvent::Unknown);
        assert!(LiveEvent::parse("not json").is_err());
        assert!(LiveEvent::parse(r#"{"type":"message"}"#).is_err());
    }
}
