use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlFormElement};

use shared::constants::{API_LOGIN, API_SIGNUP};
use shared::routes::Route;
use shared::types::AuthResult;

use crate::connect_fetch::{public_post, FetchError};
use crate::connect_sse::{start_live, stop_live};
use crate::constants::{EVENT_SUBMIT, ID_LOGIN_FORM, ID_SIGNUP_FORM};
use crate::elements::toast;
use crate::router::{go, View};
use crate::state::{refresh_signed_in, session};
use crate::utils::{form_fields, get_by_id, BusyButton};

const BUSY_LABEL: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn form_id(&self) -> &'static str {
        match self {
            AuthMode::Login => ID_LOGIN_FORM,
            AuthMode::Signup => ID_SIGNUP_FORM,
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            AuthMode::Login => API_LOGIN,
            AuthMode::Signup => API_SIGNUP,
        }
    }

    fn welcome(&self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back!",
            AuthMode::Signup => "Account created successfully!",
        }
    }
}

pub fn init(view: &Rc<View>, mode: AuthMode) {
    view.listen_id(mode.form_id(), EVENT_SUBMIT, move |e: Event| {
        e.prevent_default();
        let form = e.current_target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
            .or_else(|| get_by_id::<HtmlFormElement>(mode.form_id()));
        if let Some(form) = form {
            spawn_local(submit(form, mode));
        }
    });
}

async fn submit(form: HtmlFormElement, mode: AuthMode) {
    let busy = BusyButton::submit_of(&form, BUSY_LABEL);
    let fields = form_fields(&form);
    let result = public_post::<_, AuthResult>(mode.endpoint(), &fields).await;
    drop(busy);

    match result {
        Ok(auth) => {
            log::info!("signed in via {:?}", mode);
            session().set_token(&auth.token);
            refresh_signed_in();
            toast::success(mode.welcome());
            start_live();
            go(&Route::Dashboard.path());
        }
        Err(err @ FetchError::Network(_)) => {
            log::error!("auth request failed: {err}");
            toast::error("Network error. Please try again.");
        }
        Err(err) => {
            log::error!("auth rejected: {err}");
            toast::error(&err.message_or("Authentication failed"));
        }
    }
}

pub fn logout() {
    session().clear();
    stop_live();
    refresh_signed_in();
    toast::success("Logged out successfully");
    go(&Route::Login.path());
}
