use shared::live::{campaign_id_text, LiveEvent};

use crate::router::live_target;

/// Routes a push event to whichever page is on screen.
pub fn live_channel(event: LiveEvent) {
    match event {
        LiveEvent::Message { wa_id, message } => {
            if let Some(target) = live_target() {
                target.on_message(&wa_id, message);
            }
        }
        LiveEvent::Campaign { campaign_id, status } => {
            if let Some(target) = live_target() {
                target.on_campaign(&campaign_id_text(&campaign_id), &status);
            }
        }
        LiveEvent::Unknown => {
            log::debug!("[SSE] ignored event type");
        }
    }
}
