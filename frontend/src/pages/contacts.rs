use std::cell::RefCell;
use std::rc::Rc;

use dominator::{Dom, clone, events, html};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::callback::Timeout;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DragEvent, Event, File, HtmlFormElement, HtmlInputElement};

use shared::constants::{API_CONTACTS, API_CONTACTS_BULK, CONTACTS_PAGE_SIZE, SEARCH_DEBOUNCE_MS};
use shared::csv_import::{check_file_name, parse_contacts, ImportError};
use shared::types::{BulkContacts, Contact};
use shared::utils::{format_phone, page_count, page_query, split_list};

use crate::connect_fetch::{get_listing, request_ok, to_body, FetchError, Method};
use crate::constants::{CLASS_ACTIVE, CLASS_DRAGOVER, EVENT_CHANGE, EVENT_CLICK, EVENT_DRAG_LEAVE, EVENT_DRAG_OVER, EVENT_DROP, EVENT_INPUT, EVENT_SUBMIT, ID_CONTACTS_LIST, ID_CREATE_CONTACT_FORM, ID_CSV_FILE, ID_PAGINATION, ID_SEARCH_INPUT, ID_UPLOAD_AREA, TAG_BUTTON, TAG_DIV};
use crate::dialog::dialogs::Dialog;
use crate::elements::toast;
use crate::elements::widgets::{button, cell, cell_text, empty_state, or_dash, row, table};
use crate::router::View;
use crate::utils::{encode, form_fields, get_by_id, get_element_by_id, set_class};

const FIELD_GROUPS: &str = "groups";

/// One page of the contacts table plus the query that produced it.
#[derive(Default)]
struct Contacts {
    items: Mutable<Option<Vec<Contact>>>,
    page: Mutable<u64>,
    total: Mutable<u64>,
    search: RefCell<String>,
    debounce: RefCell<Option<Timeout>>,
}

impl Contacts {
    fn load(self: &Rc<Self>, search: String, page: u64) {
        let this = self.clone();
        spawn_local(async move {
            let path = format!("{API_CONTACTS}{}", page_query(&search, page, CONTACTS_PAGE_SIZE));
            match get_listing::<Contact>(&path, "contacts").await {
                Ok(listing) => {
                    let total = listing.total.unwrap_or(listing.items.len() as u64);
                    *this.search.borrow_mut() = search;
                    this.page.set(page);
                    this.total.set(total);
                    this.items.set(Some(listing.items));
                }
                Err(err) => {
                    log::error!("contacts page {page}: {err}");
                    toast::error("Failed to load contacts");
                }
            }
        });
    }

    fn reload_first_page(self: &Rc<Self>) {
        self.load(String::new(), 1);
    }

    /// Pages through what the search box shows now, even mid-debounce.
    fn change_page(self: &Rc<Self>, page: u64) {
        self.debounce.borrow_mut().take();
        let search = get_by_id::<HtmlInputElement>(ID_SEARCH_INPUT)
            .map(|input| input.value())
            .unwrap_or_else(|| self.search.borrow().clone());
        self.load(search, page);
    }

    /// Restarts the quiet period; only the last keystroke triggers a load.
    fn search_later(self: &Rc<Self>, search: String) {
        let this = Rc::downgrade(self);
        let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            if let Some(this) = this.upgrade() {
                this.load(search, 1);
            }
        });
        *self.debounce.borrow_mut() = Some(timer);
    }
}

pub fn init(view: &Rc<View>) {
    let contacts = Rc::new(Contacts::default());

    view.mount(ID_CONTACTS_LIST, contacts_table(&contacts));
    view.mount(ID_PAGINATION, pagination(&contacts));

    view.listen_id(ID_SEARCH_INPUT, EVENT_INPUT, clone!(contacts => move |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            contacts.search_later(input.value());
        }
    }));

    view.listen_id(ID_CREATE_CONTACT_FORM, EVENT_SUBMIT, clone!(contacts => move |e: Event| {
        e.prevent_default();
        if let Some(form) = e.current_target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) {
            spawn_local(create_contact(contacts.clone(), form));
        }
    }));

    init_import(view, &contacts);

    contacts.reload_first_page();
}

fn contacts_table(contacts: &Rc<Contacts>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(contacts.items.signal_cloned().map(clone!(contacts => move |items| {
            items.map(|items| {
                if items.is_empty() {
                    return empty_state("No contacts found", "Add some contacts to get started", None);
                }
                let rows = items.iter().map(|contact| contact_row(&contacts, contact)).collect();
                table(&["WhatsApp ID", "Display Name", "Phone", "Groups", "Actions"], rows)
            })
        })))
    })
}

fn contact_row(contacts: &Rc<Contacts>, contact: &Contact) -> Dom {
    let wa_id = contact.wa_id.clone();
    let groups = contact.groups.join(", ");
    let phone = contact.phone.as_deref().map(format_phone);
    row(vec![
        cell_text(&contact.wa_id),
        cell_text(&or_dash(contact.display_name.as_deref())),
        cell_text(&or_dash(phone.as_deref())),
        cell_text(&or_dash(Some(groups.as_str()))),
        cell(button("Delete", "btn btn-error btn-sm", clone!(contacts => move || {
            confirm_delete(&contacts, wa_id.clone());
        }))),
    ])
}

fn pagination(contacts: &Rc<Contacts>) -> Dom {
    let pages = map_ref! {
        let total = contacts.total.signal(),
        let page = contacts.page.signal() => {
            (page_count(*total, CONTACTS_PAGE_SIZE), *page)
        }
    };
    html!(TAG_DIV, {
        .child_signal(pages.map(clone!(contacts => move |(count, current)| {
            if count <= 1 {
                return None;
            }
            Some(html!(TAG_DIV, {
                .class("pagination")
                .children((1..=count).map(|page| page_button(&contacts, page, page == current)))
            }))
        })))
    })
}

fn page_button(contacts: &Rc<Contacts>, page: u64, active: bool) -> Dom {
    html!(TAG_BUTTON, {
        .class("page-btn")
        .apply_if(active, |dom| dom.class(CLASS_ACTIVE))
        .text(&page.to_string())
        .event(clone!(contacts => move |_: events::Click| contacts.change_page(page)))
    })
}

async fn create_contact(contacts: Rc<Contacts>, form: HtmlFormElement) {
    let mut fields = form_fields(&form);
    let groups = fields.get(FIELD_GROUPS).and_then(Value::as_str).map(split_list);
    if let Some(groups) = groups {
        fields.insert(FIELD_GROUPS.to_string(), Value::from(groups));
    }

    let result = match to_body(&fields) {
        Ok(body) => request_ok(API_CONTACTS, Method::Post, Some(body)).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => {
            toast::success("Contact created successfully");
            form.reset();
            contacts.reload_first_page();
        }
        Err(err) => {
            log::error!("create contact: {err}");
            toast::error(&err.message_or("Failed to create contact"));
        }
    }
}

fn confirm_delete(contacts: &Rc<Contacts>, wa_id: String) {
    Dialog::confirm("Are you sure you want to delete this contact?", clone!(contacts => move || {
        let contacts = contacts.clone();
        let wa_id = wa_id.clone();
        spawn_local(async move {
            let path = format!("{API_CONTACTS}/{}", encode(&wa_id));
            match request_ok(&path, Method::Delete, None).await {
                Ok(()) => {
                    toast::success("Contact deleted successfully");
                    contacts.reload_first_page();
                }
                Err(err) => {
                    log::error!("delete contact {wa_id}: {err}");
                    toast::error("Failed to delete contact");
                }
            }
        });
    }));
}

// === CSV import

fn init_import(view: &Rc<View>, contacts: &Rc<Contacts>) {
    let (Some(file_input), Some(upload_area)) = (get_by_id::<HtmlInputElement>(ID_CSV_FILE), get_element_by_id(ID_UPLOAD_AREA)) else {
        return;
    };

    view.listen(&upload_area, EVENT_CLICK, clone!(file_input => move |_: Event| file_input.click()));

    view.listen(&upload_area, EVENT_DRAG_OVER, clone!(upload_area => move |e: Event| {
        e.prevent_default();
        set_class(&upload_area, CLASS_DRAGOVER, true);
    }));

    view.listen(&upload_area, EVENT_DRAG_LEAVE, clone!(upload_area => move |_: Event| {
        set_class(&upload_area, CLASS_DRAGOVER, false);
    }));

    view.listen(&upload_area, EVENT_DROP, clone!(upload_area, file_input, contacts => move |e: Event| {
        e.prevent_default();
        set_class(&upload_area, CLASS_DRAGOVER, false);
        let files = e.dyn_ref::<DragEvent>()
            .and_then(|e| e.data_transfer())
            .and_then(|transfer| transfer.files());
        if let Some(files) = files {
            if let Some(file) = files.get(0) {
                file_input.set_files(Some(&files));
                spawn_local(import_file(contacts.clone(), file));
            }
        }
    }));

    view.listen(&file_input, EVENT_CHANGE, clone!(file_input, contacts => move |_: Event| {
        if let Some(file) = file_input.files().and_then(|files| files.get(0)) {
            spawn_local(import_file(contacts.clone(), file));
        }
    }));
}

async fn import_file(contacts: Rc<Contacts>, file: File) {
    if let Err(err) = check_file_name(&file.name()) {
        toast::error(&err.to_string());
        return;
    }

    let parsed = match read_file(&file).await {
        Some(text) => parse_contacts(&text),
        None => {
            toast::error("Failed to parse CSV file");
            return;
        }
    };
    let rows = match parsed {
        Ok(rows) => rows,
        Err(err @ ImportError::NoValidRows) => {
            toast::error(&err.to_string());
            return;
        }
        Err(err) => {
            log::error!("csv import {}: {err}", file.name());
            toast::error("Failed to parse CSV file");
            return;
        }
    };

    let count = rows.len();
    match send_bulk(rows).await {
        Ok(()) => {
            log::info!("imported {count} contacts from {}", file.name());
            toast::success(&format!("{count} contacts imported successfully"));
            contacts.reload_first_page();
        }
        Err(err) => {
            log::error!("bulk import: {err}");
            toast::error(&err.message_or("Failed to import contacts"));
        }
    }
}

async fn read_file(file: &File) -> Option<String> {
    match JsFuture::from(file.text()).await {
        Ok(text) => text.as_string(),
        Err(err) => {
            log::error!("read {}: {:?}", file.name(), err);
            None
        }
    }
}

async fn send_bulk(contacts: Vec<Contact>) -> Result<(), FetchError> {
    let body = to_body(&BulkContacts { contacts })?;
    request_ok(API_CONTACTS_BULK, Method::Post, Some(body)).await
}
