use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventSource, MessageEvent};

use shared::live::{LiveEvent, LiveLink};

use crate::loader::live_channel;
use crate::state::session;

/// The open `EventSource` together with the callbacks bound to it.
struct Connection {
    sse: EventSource,
    _onopen: Closure<dyn FnMut()>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.sse.set_onopen(None);
        self.sse.set_onmessage(None);
        self.sse.set_onerror(None);
        self.sse.close();
    }
}

thread_local! {
    static LINK: RefCell<LiveLink> = RefCell::new(LiveLink::default());
    static CONNECTION: RefCell<Option<Connection>> = RefCell::new(None);
}

/// Opens the push stream for the current token, if there is one.
pub fn start_live() {
    let has_token = session().has_token();
    if LINK.with(|link| link.borrow_mut().open(has_token)) {
        connect();
    }
}

/// Logout path: closes the stream and cancels any pending reconnect.
pub fn stop_live() {
    LINK.with(|link| link.borrow_mut().close());
    drop_connection();
}

fn drop_connection() {
    let previous = CONNECTION.with(|conn| conn.borrow_mut().take());
    drop(previous);
}

fn connect() {
    drop_connection();

    let session = session();
    let url = session.config().events_url_for(&session.token());
    let sse = match EventSource::new(&url) {
        Ok(sse) => sse,
        Err(err) => {
            log::error!("[SSE] cannot open: {:?}", err);
            handle_sse_error();
            return;
        }
    };

    let onopen = Closure::<dyn FnMut()>::new(move || {
        log::info!("[SSE] opened");
        LINK.with(|link| link.borrow_mut().opened());
    });
    sse.set_onopen(Some(onopen.as_ref().unchecked_ref()));

    let onmessage = Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
        let Some(text) = e.data().as_string() else {
            log::error!("[SSE] non-text payload: {:?}", e.data());
            return;
        };
        match LiveEvent::parse(&text) {
            Ok(event) => live_channel(event),
            Err(err) => log::error!("[SSE] malformed payload {text}: {err}"),
        }
    });
    sse.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

    // the connection is torn down from a task so the callback is not dropped mid-call
    let onerror = Closure::<dyn FnMut(_)>::new(move |_e: Event| {
        spawn_local(async { handle_sse_error() });
    });
    sse.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    CONNECTION.with(|conn| {
        *conn.borrow_mut() = Some(Connection {
            sse,
            _onopen: onopen,
            _onmessage: onmessage,
            _onerror: onerror,
        })
    });
}

fn handle_sse_error() {
    log::info!("[SSE] error event");
    drop_connection();
    let scheduled = LINK.with(|link| {
        let mut link = link.borrow_mut();
        link.failed().map(|delay| (delay, link.generation(), link.attempts()))
    });
    if let Some((delay, generation, attempts)) = scheduled {
        log::info!("[SSE] reconnect attempt {attempts} in {delay} ms");
        let timer = Timeout::new(delay, move || {
            let has_token = session().has_token();
            if LINK.with(|link| link.borrow_mut().retry(generation, has_token)) {
                connect();
            }
        });
        timer.forget();
    }
}
