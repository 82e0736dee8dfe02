pub const RECONNECT_DELAY_MS: u32 = 3_000;
pub const TOAST_LIFETIME_MS: u32 = 3_000;
pub const SEARCH_DEBOUNCE_MS: u32 = 300;
pub const CONTACTS_PAGE_SIZE: u64 = 20;
pub const RECENT_CAMPAIGNS: usize = 5;

pub static DEFAULT_API_BASE: &'static str = "http://localhost:3000";
pub static DEFAULT_EVENTS_URL: &'static str = "http://localhost:3000/events";

pub static STORAGE_TOKEN: &'static str = "token";
pub static STORAGE_API_BASE: &'static str = "apiBase";
pub static STORAGE_EVENTS_URL: &'static str = "eventsUrl";

pub static API_LOGIN: &'static str = "/api/auth/login";
pub static API_SIGNUP: &'static str = "/api/auth/signup";
pub static API_CONTACTS: &'static str = "/api/contacts";
pub static API_CONTACTS_BULK: &'static str = "/api/contacts/bulk";
pub static API_MESSAGES: &'static str = "/api/messages";
pub static API_CAMPAIGNS: &'static str = "/api/campaigns";
pub static API_CAMPAIGNS_CREATE: &'static str = "/api/campaigns/create";
pub static API_TEMPLATES: &'static str = "/api/templates";
pub static API_TEMPLATES_SYNC: &'static str = "/api/templates/sync";

pub static HEADER_AUTHORIZATION: &'static str = "Authorization";
pub static HEADER_CONTENT_TYPE: &'static str = "Content-Type";
pub static CONTENT_TYPE_JSON: &'static str = "application/json";
