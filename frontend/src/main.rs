use crate::elements::app_root::{app_root, mount_nav};

mod elements;
mod utils;
mod constants;
mod state;
mod dialog;
mod pages;
mod router;
mod connect_sse;
mod connect_fetch;
pub mod loader;

pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting, api base {}", state::session().config().api_base);

    dominator::append_dom(&dominator::body(), app_root());
    mount_nav();
    router::start();
}
