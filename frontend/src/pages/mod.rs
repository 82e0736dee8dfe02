pub mod auth;
pub mod campaign_detail;
pub mod campaigns;
pub mod contacts;
pub mod dashboard;
pub mod inbox;
pub mod templates;
