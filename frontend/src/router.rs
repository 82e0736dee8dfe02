use std::cell::{Cell, RefCell};
use std::rc::Rc;

use discard::Discard;
use dominator::{Dom, DomHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, HtmlAnchorElement, MouseEvent, Url};

use shared::routes::Route;
use shared::types::ChatMessage;

use crate::connect_fetch::fetch_fragment;
use crate::connect_sse::start_live;
use crate::constants::{EVENT_CLICK, EVENT_POPSTATE, ID_APP, SELECTOR_APP_LINK};
use crate::elements::toast;
use crate::pages::{auth, campaign_detail, campaigns, contacts, dashboard, inbox, templates};
use crate::state::{refresh_signed_in, session};
use crate::utils::{current_path, get_element_by_id, get_location, push_history, replace_history};

/// Receiver for push events while its page is mounted.
pub trait LiveTarget {
    fn on_message(self: Rc<Self>, _wa_id: &str, _message: ChatMessage) {}
    fn on_campaign(self: Rc<Self>, _id: &str, _status: &str) {}
}

struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// Everything one page mounted: dominator trees, DOM listeners on the
/// fragment, and the page's push-event receiver. Torn down on navigation.
#[derive(Default)]
pub struct View {
    handles: RefCell<Vec<DomHandle>>,
    listeners: RefCell<Vec<Listener>>,
    live: RefCell<Option<Rc<dyn LiveTarget>>>,
    discarded: Cell<bool>,
}

impl View {
    /// Appends `dom` to the element with `id`. Missing targets are skipped.
    pub fn mount(&self, id: &str, dom: Dom) {
        if self.discarded.get() {
            return;
        }
        if let Some(parent) = get_element_by_id(id) {
            self.handles.borrow_mut().push(dominator::append_dom(&parent, dom));
        }
    }

    pub fn listen<F>(&self, target: &EventTarget, name: &'static str, handler: F)
        where F: FnMut(Event) + 'static
    {
        if self.discarded.get() {
            return;
        }
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
            log::error!("add_event_listener {name}: {:?}", err);
            return;
        }
        self.listeners.borrow_mut().push(Listener { target: target.clone(), name, callback });
    }

    pub fn listen_id<F>(&self, id: &str, name: &'static str, handler: F)
        where F: FnMut(Event) + 'static
    {
        if let Some(element) = get_element_by_id(id) {
            self.listen(&element, name, handler);
        }
    }

    pub fn set_live_target(&self, target: Rc<dyn LiveTarget>) {
        *self.live.borrow_mut() = Some(target);
    }

    fn discard(&self) {
        self.discarded.set(true);
        for handle in self.handles.borrow_mut().drain(..) {
            handle.discard();
        }
        self.live.borrow_mut().take();
        // listeners are removed last: one of them may be running this navigation
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        spawn_local(async move { drop(listeners) });
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Rc<View>>> = RefCell::new(None);
}

pub fn live_target() -> Option<Rc<dyn LiveTarget>> {
    CURRENT.with(|current| {
        current.borrow().as_ref().and_then(|view| view.live.borrow().clone())
    })
}

/// Pushes `path` onto the history and renders it.
pub fn go(path: &str) {
    push_history(path);
    navigate(path);
}

pub fn navigate(path: &str) {
    let path = path.to_string();
    spawn_local(async move { navigate_to(path).await });
}

async fn navigate_to(path: String) {
    let route = Route::resolve(&path, session().has_token());
    let resolved = route.path();
    if resolved != path {
        replace_history(&resolved);
    }

    let html = match fetch_fragment(route.fragment()).await {
        Ok(html) => html,
        Err(err) => {
            log::error!("navigation to {path} failed: {err}");
            toast::error("Page not found");
            return;
        }
    };

    let previous = CURRENT.with(|current| current.borrow_mut().take());
    if let Some(previous) = previous {
        previous.discard();
    }

    if let Some(app) = get_element_by_id(ID_APP) {
        app.set_inner_html(&html);
    }

    let view = Rc::new(View::default());
    init_page(&route, &view);
    CURRENT.with(|current| *current.borrow_mut() = Some(view));
    refresh_signed_in();
}

fn init_page(route: &Route, view: &Rc<View>) {
    match route {
        Route::Login => auth::init(view, auth::AuthMode::Login),
        Route::Signup => auth::init(view, auth::AuthMode::Signup),
        Route::Dashboard => dashboard::init(view),
        Route::Inbox => inbox::init(view),
        Route::Contacts => contacts::init(view),
        Route::Campaigns => campaigns::init_list(view),
        Route::CampaignNew => campaigns::init_new(view),
        Route::CampaignDetail(id) => campaign_detail::init(view, id),
        Route::Templates => templates::init(view),
    }
}

/// Installs the app-wide listeners, renders the first page and opens the
/// push stream when a session survives from a previous visit.
pub fn start() {
    if let Some(window) = web_sys::window() {
        let onclick = Closure::<dyn FnMut(MouseEvent)>::new(handle_link_click);
        window.add_event_listener_with_callback(EVENT_CLICK, onclick.as_ref().unchecked_ref()).ok();
        onclick.forget();

        let onpopstate = Closure::<dyn FnMut()>::new(|| navigate(&current_path()));
        window.add_event_listener_with_callback(EVENT_POPSTATE, onpopstate.as_ref().unchecked_ref()).ok();
        onpopstate.forget();
    }

    let path = current_path();
    spawn_local(async move {
        navigate_to(path).await;
        if session().has_token() {
            start_live();
        }
    });
}

fn handle_link_click(e: MouseEvent) {
    if e.default_prevented() || e.button() != 0 || e.ctrl_key() || e.meta_key() || e.shift_key() {
        return;
    }
    let anchor = e.target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(SELECTOR_APP_LINK).ok().flatten())
        .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok());
    let Some(anchor) = anchor else {
        return;
    };
    let Ok(url) = Url::new(&anchor.href()) else {
        return;
    };
    let origin = get_location().and_then(|l| l.origin().ok());
    if origin.as_deref() == Some(url.origin().as_str()) {
        e.prevent_default();
        go(&url.pathname());
    }
}
