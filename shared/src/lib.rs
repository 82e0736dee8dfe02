pub mod config;
pub mod constants;
pub mod csv_import;
pub mod live;
pub mod routes;
pub mod session;
pub mod types;
pub mod utils;
