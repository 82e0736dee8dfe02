use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server ids arrive as strings or numbers; the client only ever compares them.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

fn id_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Explicit `null` reads as the field's default, like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where D: Deserializer<'de>, T: Deserialize<'de> + Default
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// === collections

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

/// Collections come back either as a bare array or wrapped as `{ <key>: [...], total }`.
pub fn listing<T: DeserializeOwned>(value: Value, key: &str) -> Result<Listing<T>, serde_json::Error> {
    match value {
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_u64);
            let items = match map.remove(key) {
                Some(items) => serde_json::from_value(items)?,
                None => vec![],
            };
            Ok(Listing { items, total })
        }
        other => Ok(Listing { items: serde_json::from_value(other)?, total: None }),
    }
}

// === auth

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResult {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// === contacts

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "id_string_or_empty")]
    pub wa_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn label(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.wa_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkContacts {
    pub contacts: Vec<Contact>,
}

// === inbox

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn outgoing(text: &str) -> Self {
        Self {
            direction: Some("out".to_string()),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn body(&self) -> &str {
        self.text.as_deref().or(self.message.as_deref()).unwrap_or_default()
    }

    pub fn direction(&self) -> &str {
        self.direction.as_deref().filter(|d| !d.is_empty()).unwrap_or("out")
    }

    pub fn time(&self) -> Option<&Value> {
        self.timestamp.as_ref().or(self.created_at.as_ref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub text: String,
}

// === campaigns

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Audience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Audience {
    pub fn describe(audience: Option<&Audience>) -> String {
        match audience {
            Some(Audience { group: Some(group), .. }) if !group.is_empty() => format!("Group: {group}"),
            Some(Audience { query: Some(query), .. }) if !query.is_empty() => format!("Query: {query}"),
            _ => "All contacts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, deserialize_with = "id_string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    pub fn can_start(&self) -> bool {
        matches!(self.status.as_str(), "draft" | "scheduled")
    }

    pub fn can_pause(&self) -> bool {
        self.status == "running"
    }

    pub fn can_complete(&self) -> bool {
        matches!(self.status.as_str(), "running" | "paused")
    }

    pub fn progress(&self) -> String {
        format!("{}/{}", self.sent.unwrap_or_default(), self.total.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignAction {
    Start,
    Pause,
    Complete,
}

impl CampaignAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignAction::Start => "start",
            CampaignAction::Pause => "pause",
            CampaignAction::Complete => "complete",
        }
    }

    pub fn in_progress(&self) -> &'static str {
        match self {
            CampaignAction::Start => "Starting",
            CampaignAction::Pause => "Pausing",
            CampaignAction::Complete => "Completing",
        }
    }

    pub fn done(&self) -> &'static str {
        match self {
            CampaignAction::Start => "started",
            CampaignAction::Pause => "paused",
            CampaignAction::Complete => "completed",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResult {
    pub status: String,
}

/// What the campaign views currently hold in memory: the listed campaigns
/// and the one open in the detail view. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignBoard {
    pub list: Vec<Campaign>,
    pub current: Option<Campaign>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPatch {
    pub list: bool,
    pub current: bool,
}

impl CampaignBoard {
    /// Rewrites `status` of the campaign with `id` wherever it is held.
    pub fn apply_status(&mut self, id: &str, status: &str) -> StatusPatch {
        let mut patch = StatusPatch::default();
        if let Some(item) = self.list.iter_mut().find(|row| row.id == id) {
            item.status = status.to_string();
            patch.list = true;
        }
        if let Some(current) = self.current.as_mut().filter(|row| row.id == id) {
            current.status = status.to_string();
            patch.current = true;
        }
        patch
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignStats {
    pub total: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
}

impl CampaignStats {
    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        let count = |status: &str| campaigns.iter().filter(|row| row.status == status).count();
        Self {
            total: campaigns.len(),
            running: count("running"),
            completed: count("completed"),
            failed: count("failed"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CampaignMetrics {
    #[serde(deserialize_with = "null_default")]
    pub sent: u64,
    #[serde(deserialize_with = "null_default")]
    pub delivered: u64,
    #[serde(deserialize_with = "null_default")]
    pub read: u64,
    #[serde(deserialize_with = "null_default")]
    pub failed: u64,
    #[serde(deserialize_with = "null_default")]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMessage {
    #[serde(default, deserialize_with = "id_string_or_empty")]
    pub wa_id: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default)]
    pub sent_at: Option<Value>,
    #[serde(default)]
    pub last_status_at: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CampaignCost {
    pub model: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub items: Vec<CostItem>,
    #[serde(deserialize_with = "null_default")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostItem {
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    #[serde(deserialize_with = "null_default")]
    pub count: u64,
    pub unit_cost: Option<f64>,
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    pub template_name: String,
    pub audience: Audience,
    pub schedule_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCampaign {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

// === templates

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Template {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    pub fn status_label(&self) -> &str {
        self.status.as_deref().filter(|s| !s.is_empty()).unwrap_or("approved")
    }

    pub fn components_pretty(&self) -> Option<String> {
        self.components.as_ref().and_then(|c| serde_json::to_string_pretty(c).ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncResult {
    pub synced: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn campaign(id: &str, status: &str) -> Campaign {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("c-{id}"),
            "status": status,
            "templateName": "welcome",
            "sent": 3,
            "total": 10,
            "owner": "ops"
        }))
        .unwrap()
    }

    #[test]
    fn listing_accepts_bare_array_and_wrapper() {
        let bare: Listing<Campaign> = listing(json!([{"id": 1, "status": "draft"}]), "campaigns").unwrap();
        assert_eq!(bare.items[0].id, "1");
        assert_eq!(bare.total, None);

        let wrapped: Listing<Contact> = listing(
            json!({"contacts": [{"waId": "123"}], "total": 41}),
            "contacts",
        )
        .unwrap();
        assert_eq!(wrapped.items[0].wa_id, "123");
        assert_eq!(wrapped.total, Some(41));

        let missing: Listing<Contact> = listing(json!({"total": 0}), "contacts").unwrap();
        assert!(missing.items.is_empty());
    }

    #[test]
    fn null_fields_do_not_sink_listing() {
        let contacts: Listing<Contact> = listing(
            json!([{"waId": "1", "groups": ["x"]}, {"waId": "2", "groups": null, "displayName": null}, {"phone": "5"}]),
            "contacts",
        )
        .unwrap();
        assert_eq!(contacts.items.len(), 3);
        assert!(contacts.items[1].groups.is_empty());
        assert_eq!(contacts.items[1].label(), "2");
        assert_eq!(contacts.items[2].wa_id, "");

        let campaigns: Listing<Campaign> = listing(
            json!({"campaigns": [{"id": 1, "name": null, "status": null}, {"name": "no id"}]}),
            "campaigns",
        )
        .unwrap();
        assert_eq!(campaigns.items[0].name, "");
        assert_eq!(campaigns.items[0].status, "");
        assert_eq!(campaigns.items[1].id, "");

        let templates: Listing<Template> = listing(json!([{"name": null, "category": null}]), "templates").unwrap();
        assert_eq!(templates.items[0].name, "");
        assert_eq!(templates.items[0].status_label(), "approved");

        let messages: Listing<CampaignMessage> = listing(json!([{"waId": null, "status": null}]), "messages").unwrap();
        assert_eq!(messages.items[0].status, "");

        let cost: CampaignCost = serde_json::from_value(
            json!({"items": [{"category": null, "count": null, "unitCost": null}], "total": null}),
        )
        .unwrap();
        assert_eq!(cost.items[0].count, 0);
        assert_eq!(cost.total, 0.0);

        let metrics: CampaignMetrics = serde_json::from_value(json!({"sent": null, "read": 4})).unwrap();
        assert_eq!((metrics.sent, metrics.read), (0, 4));
    }

    #[test]
    fn status_patch_touches_only_target() {
        let mut board = CampaignBoard {
            list: vec![campaign("1", "draft"), campaign("2", "running")],
            current: Some(campaign("1", "draft")),
        };
        let before = board.clone();

        let patch = board.apply_status("1", "running");
        assert_eq!(patch, StatusPatch { list: true, current: true });

        let patched = &board.list[0];
        assert_eq!(patched.status, "running");
        assert_eq!(Campaign { status: "draft".into(), ..patched.clone() }, before.list[0]);
        assert_eq!(board.list[1], before.list[1]);
        assert_eq!(board.current.as_ref().map(|c| c.status.as_str()), Some("running"));
        assert_eq!(board.current.as_ref().unwrap().extra["owner"], "ops");
    }

    #[test]
    fn status_patch_with_single_side_populated() {
        let mut board = CampaignBoard { list: vec![], current: Some(campaign("5", "running")) };
        assert_eq!(board.apply_status("5", "paused"), StatusPatch { list: false, current: true });
        assert_eq!(board.apply_status("6", "paused"), StatusPatch::default());
    }

    #[test]
    fn stats_count_by_status() {
        let list = vec![
            campaign("1", "running"),
            campaign("2", "completed"),
            campaign("3", "failed"),
            campaign("4", "running"),
            campaign("5", "draft"),
        ];
        assert_eq!(
            CampaignStats::from_campaigns(&list),
            CampaignStats { total: 5, running: 2, completed: 1, failed: 1 }
        );
    }

    #[test]
    fn campaign_actions_follow_status() {
        assert!(campaign("1", "scheduled").can_start());
        assert!(!campaign("1", "running").can_start());
        assert!(campaign("1", "running").can_pause());
        assert!(campaign("1", "paused").can_complete());
        assert!(!campaign("1", "completed").can_complete());
        assert_eq!(campaign("1", "running").progress(), "3/10");
    }

    #[test]
    fn passthrough_fields_survive_roundtrip() {
        let source = json!({"waId": 555, "displayName": "Bob", "tier": "gold"});
        let contact: Contact = serde_json::from_value(source).unwrap();
        assert_eq!(contact.wa_id, "555");
        assert_eq!(contact.label(), "Bob");
        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            json!({"waId": "555", "displayName": "Bob", "tier": "gold"})
        );
    }

    #[test]
    fn chat_message_fallbacks() {
        let msg: ChatMessage = serde_json::from_value(json!({"message": "hi", "createdAt": "2024-01-01"})).unwrap();
        assert_eq!(msg.body(), "hi");
        assert_eq!(msg.direction(), "out");
        assert_eq!(msg.time(), Some(&json!("2024-01-01")));
    }

    #[test]
    fn audience_description() {
        let group = Audience { group: Some("vip".into()), query: None };
        let query = Audience { group: None, query: Some("city=x".into()) };
        assert_eq!(Audience::describe(Some(&group)), "Group: vip");
        assert_eq!(Audience::describe(Some(&query)), "Query: city=x");
        assert_eq!(Audience::describe(None), "All contacts");
    }

    #[test]
    fn new_campaign_sends_null_schedule() {
        let payload = NewCampaign {
            name: "Spring".into(),
            template_name: "promo".into(),
            audience: Audience { group: Some("vip".into()), query: None },
            schedule_at: None,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"name": "Spring", "templateName": "promo", "audience": {"group": "vip"}, "scheduleAt": null})
        );
    }
}
