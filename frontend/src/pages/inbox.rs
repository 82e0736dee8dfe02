use std::cell::Cell;
use std::rc::Rc;

use dominator::{Dom, clone, events, html};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use futures_signals::signal_vec::{MutableVec, SignalVecExt};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlFormElement};

use shared::constants::{API_CONTACTS, API_MESSAGES};
use shared::types::{ChatMessage, Contact, SendMessage};
use shared::utils::{class_token, format_phone};

use crate::connect_fetch::{get_listing, request_ok, to_body, Method};
use crate::constants::{EVENT_SUBMIT, ID_CHAT_FORM, ID_CHAT_HEADER, ID_CHAT_MESSAGES, ID_CONTACTS_LIST, TAG_DIV};
use crate::elements::toast;
use crate::elements::widgets::empty_state;
use crate::router::{LiveTarget, View};
use crate::utils::{encode, format_optional_date, get_value_in, now, scroll_to_bottom, set_value_in};

const FIELD_MESSAGE: &str = "message";

#[derive(Debug, Clone, PartialEq)]
struct Bubble {
    id: u64,
    direction: String,
    body: String,
    time: String,
}

/// Conversation state of the inbox page.
#[derive(Default)]
struct Inbox {
    contacts: Mutable<Option<Vec<Contact>>>,
    current: Mutable<Option<Contact>>,
    bubbles: MutableVec<Bubble>,
    loaded: Mutable<bool>,
    seq: Cell<u64>,
}

impl Inbox {
    fn bubble(&self, message: &ChatMessage, direction: &str) -> Bubble {
        let id = self.seq.get() + 1;
        self.seq.set(id);
        Bubble {
            id,
            direction: direction.to_string(),
            body: message.body().to_string(),
            time: format_optional_date(message.time(), ""),
        }
    }

    fn current_wa_id(&self) -> Option<String> {
        self.current.lock_ref().as_ref().map(|c| c.wa_id.clone())
    }
}

impl LiveTarget for Inbox {
    fn on_message(self: Rc<Self>, wa_id: &str, message: ChatMessage) {
        if self.current_wa_id().as_deref() != Some(wa_id) {
            return;
        }
        let mut message = message;
        if message.timestamp.is_none() {
            message.timestamp = Some(now());
        }
        let bubble = self.bubble(&message, "in");
        self.loaded.set_neq(true);
        self.bubbles.lock_mut().push_cloned(bubble);
    }
}

pub fn init(view: &Rc<View>) {
    let inbox = Rc::new(Inbox::default());

    view.mount(ID_CONTACTS_LIST, contacts_view(&inbox));
    view.mount(ID_CHAT_HEADER, chat_header(&inbox));
    view.mount(ID_CHAT_MESSAGES, messages_view(&inbox));

    view.listen_id(ID_CHAT_FORM, EVENT_SUBMIT, clone!(inbox => move |e: Event| {
        e.prevent_default();
        if let Some(form) = e.current_target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) {
            send(&inbox, &form);
        }
    }));

    view.set_live_target(inbox.clone());

    spawn_local(async move {
        match get_listing::<Contact>(API_CONTACTS, "contacts").await {
            Ok(listing) => inbox.contacts.set(Some(listing.items)),
            Err(err) => {
                log::error!("inbox contacts: {err}");
                toast::error("Failed to load contacts");
            }
        }
    });
}

fn contacts_view(inbox: &Rc<Inbox>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(inbox.contacts.signal_cloned().map(clone!(inbox => move |contacts| {
            contacts.map(|contacts| {
                if contacts.is_empty() {
                    empty_state("No contacts", "Start by adding some contacts", None)
                } else {
                    html!(TAG_DIV, {
                        .children(contacts.into_iter().map(|contact| contact_item(&inbox, contact)))
                    })
                }
            })
        })))
    })
}

fn contact_item(inbox: &Rc<Inbox>, contact: Contact) -> Dom {
    let wa_id = contact.wa_id.clone();
    html!(TAG_DIV, {
        .class("contact-item")
        .attr("data-wa-id", &contact.wa_id)
        .class_signal("active", inbox.current.signal_ref(clone!(wa_id => move |current| {
            current.as_ref().map(|c| c.wa_id == wa_id).unwrap_or(false)
        })))
        .children([
            html!(TAG_DIV, { .class("contact-name").text(contact.label()) }),
            html!(TAG_DIV, { .class("contact-phone").text(&contact.phone.as_deref().map(format_phone).unwrap_or_default()) }),
        ])
        .event(clone!(inbox => move |_: events::Click| {
            select(&inbox, contact.clone());
        }))
    })
}

fn chat_header(inbox: &Rc<Inbox>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(inbox.current.signal_cloned().map(|current| current.map(|contact| {
            html!(TAG_DIV, {
                .children([
                    html!(TAG_DIV, { .class("contact-name").text(contact.label()) }),
                    html!(TAG_DIV, { .class("contact-phone").text(&contact.phone.as_deref().map(format_phone).unwrap_or_default()) }),
                ])
            })
        })))
    })
}

fn messages_view(inbox: &Rc<Inbox>) -> Dom {
    let empty = map_ref! {
        let loaded = inbox.loaded.signal(),
        let is_empty = inbox.bubbles.signal_vec_cloned().is_empty() => {
            *loaded && *is_empty
        }
    };
    html!(TAG_DIV, {
        .child_signal(empty.map(|empty| {
            if empty {
                Some(empty_state("No messages yet", "Start a conversation", None))
            } else {
                None
            }
        }))
        .children_signal_vec(inbox.bubbles.signal_vec_cloned().map(bubble_view))
    })
}

fn bubble_view(bubble: Bubble) -> Dom {
    html!(TAG_DIV, {
        .class("bubble")
        .apply(|dom| match class_token(&bubble.direction) {
            Some(token) => dom.class(token.as_str()),
            None => dom,
        })
        .children([
            html!(TAG_DIV, { .text(&bubble.body) }),
            html!(TAG_DIV, { .class("bubble-time").text(&bubble.time) }),
        ])
        .after_inserted(|_| scroll_to_bottom(ID_CHAT_MESSAGES))
    })
}

fn select(inbox: &Rc<Inbox>, contact: Contact) {
    let wa_id = contact.wa_id.clone();
    inbox.current.set(Some(contact));
    inbox.loaded.set_neq(false);
    inbox.bubbles.lock_mut().clear();

    let inbox = inbox.clone();
    spawn_local(async move {
        let path = format!("{API_MESSAGES}/{}", encode(&wa_id));
        match get_listing::<ChatMessage>(&path, "messages").await {
            Ok(listing) => {
                // a later selection owns the pane now
                if inbox.current_wa_id().as_deref() != Some(wa_id.as_str()) {
                    return;
                }
                let bubbles = listing.items.iter()
                    .map(|message| inbox.bubble(message, message.direction()))
                    .collect();
                inbox.bubbles.lock_mut().replace_cloned(bubbles);
                inbox.loaded.set_neq(true);
            }
            Err(err) => {
                log::error!("messages for {wa_id}: {err}");
                toast::error("Failed to load messages");
            }
        }
    });
}

fn send(inbox: &Rc<Inbox>, form: &HtmlFormElement) {
    let Some(wa_id) = inbox.current_wa_id() else {
        toast::warning("Please select a contact first");
        return;
    };
    let text = get_value_in(form, FIELD_MESSAGE).trim().to_string();
    if text.is_empty() {
        return;
    }

    let mut message = ChatMessage::outgoing(&text);
    message.timestamp = Some(now());
    let bubble = inbox.bubble(&message, "out");
    let bubble_id = bubble.id;
    inbox.loaded.set_neq(true);
    inbox.bubbles.lock_mut().push_cloned(bubble);
    set_value_in(form, FIELD_MESSAGE, "");

    let inbox = inbox.clone();
    spawn_local(async move {
        let path = format!("{API_MESSAGES}/{}/send", encode(&wa_id));
        let result = match to_body(&SendMessage { text }) {
            Ok(body) => request_ok(&path, Method::Post, Some(body)).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log::error!("send to {wa_id}: {err}");
            toast::error("Failed to send message");
            inbox.bubbles.lock_mut().retain(|b| b.id != bubble_id);
        }
    });
}
