pub static PROP_VALUE: &'static str = "value";
pub static PROP_HREF: &'static str = "href";
pub static PROP_DATA_LINK: &'static str = "data-link";

pub static TAG_DIV: &'static str = "div";
pub static TAG_SPAN: &'static str = "span";
pub static TAG_BUTTON: &'static str = "button";
pub static TAG_OPTION: &'static str = "option";
pub static TAG_LINK: &'static str = "a";
pub static TAG_TABLE: &'static str = "table";
pub static TAG_TR: &'static str = "tr";
pub static TAG_TD: &'static str = "td";
pub static TAG_TH: &'static str = "th";
pub static TAG_P: &'static str = "p";
pub static TAG_H3: &'static str = "h3";

pub static EVENT_CLICK: &'static str = "click";
pub static EVENT_SUBMIT: &'static str = "submit";
pub static EVENT_INPUT: &'static str = "input";
pub static EVENT_CHANGE: &'static str = "change";
pub static EVENT_DRAG_OVER: &'static str = "dragover";
pub static EVENT_DRAG_LEAVE: &'static str = "dragleave";
pub static EVENT_DROP: &'static str = "drop";
pub static EVENT_POPSTATE: &'static str = "popstate";

pub static CLASS_ACTIVE: &'static str = "active";
pub static CLASS_DRAGOVER: &'static str = "dragover";

pub static ID_APP: &'static str = "app";
pub static ID_NAV: &'static str = "nav";

pub static ID_LOGIN_FORM: &'static str = "login-form";
pub static ID_SIGNUP_FORM: &'static str = "signup-form";

pub static ID_DASHBOARD_STATS: &'static str = "dashboard-stats";
pub static ID_RECENT_CAMPAIGNS: &'static str = "recent-campaigns";

pub static ID_CONTACTS_LIST: &'static str = "contacts-list";
pub static ID_CHAT_HEADER: &'static str = "chat-header";
pub static ID_CHAT_MESSAGES: &'static str = "chat-messages";
pub static ID_CHAT_FORM: &'static str = "chat-form";

pub static ID_SEARCH_INPUT: &'static str = "search-input";
pub static ID_PAGINATION: &'static str = "pagination";
pub static ID_CREATE_CONTACT_FORM: &'static str = "create-contact-form";
pub static ID_CSV_FILE: &'static str = "csv-file";
pub static ID_UPLOAD_AREA: &'static str = "upload-area";

pub static ID_CAMPAIGNS_LIST: &'static str = "campaigns-list";
pub static ID_CREATE_CAMPAIGN_FORM: &'static str = "create-campaign-form";
pub static ID_TEMPLATE_SELECT: &'static str = "template-select";
pub static ID_CAMPAIGN_HEADER: &'static str = "campaign-header";
pub static ID_OVERVIEW_CONTENT: &'static str = "overview-content";
pub static ID_MESSAGES_CONTENT: &'static str = "messages-content";
pub static ID_COST_CONTENT: &'static str = "cost-content";

pub static ID_TEMPLATES_LIST: &'static str = "templates-list";
pub static ID_CREATE_TEMPLATE_FORM: &'static str = "create-template-form";
pub static ID_SYNC_TEMPLATES: &'static str = "sync-templates";

pub static SELECTOR_SUBMIT: &'static str = "button[type=\"submit\"]";
pub static SELECTOR_FILTER_BUTTONS: &'static str = ".filter-btn";
pub static SELECTOR_TABS: &'static str = ".tab";
pub static SELECTOR_TAB_CONTENTS: &'static str = ".tab-content";
pub static SELECTOR_APP_LINK: &'static str = "a[data-link]";
