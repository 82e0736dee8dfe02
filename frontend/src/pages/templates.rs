use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::signal::{Mutable, SignalExt};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlButtonElement, HtmlFormElement};

use shared::constants::{API_TEMPLATES, API_TEMPLATES_SYNC};
use shared::types::{SyncResult, Template};

use crate::connect_fetch::{get_listing, request, request_ok, to_body, Method};
use crate::constants::{EVENT_CLICK, EVENT_SUBMIT, ID_CREATE_TEMPLATE_FORM, ID_SYNC_TEMPLATES, ID_TEMPLATES_LIST, TAG_DIV, TAG_H3, TAG_P, TAG_SPAN};
use crate::dialog::dialogs::Dialog;
use crate::elements::toast;
use crate::elements::widgets::{button, chip, empty_state};
use crate::router::View;
use crate::utils::{encode, form_fields, get_by_id, BusyButton};

const FIELD_COMPONENTS: &str = "components";

#[derive(Default)]
struct Templates {
    items: Mutable<Option<Vec<Template>>>,
}

impl Templates {
    fn load(self: &Rc<Self>) {
        let this = self.clone();
        spawn_local(async move {
            match get_listing::<Template>(API_TEMPLATES, "templates").await {
                Ok(listing) => this.items.set(Some(listing.items)),
                Err(err) => {
                    log::error!("templates: {err}");
                    toast::error("Failed to load templates");
                }
            }
        });
    }
}

pub fn init(view: &Rc<View>) {
    let templates = Rc::new(Templates::default());

    view.mount(ID_TEMPLATES_LIST, templates_grid(&templates));

    view.listen_id(ID_CREATE_TEMPLATE_FORM, EVENT_SUBMIT, clone!(templates => move |e: Event| {
        e.prevent_default();
        if let Some(form) = e.current_target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) {
            spawn_local(create_template(templates.clone(), form));
        }
    }));

    view.listen_id(ID_SYNC_TEMPLATES, EVENT_CLICK, clone!(templates => move |_: Event| {
        spawn_local(sync_templates(templates.clone()));
    }));

    templates.load();
}

fn templates_grid(templates: &Rc<Templates>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(templates.items.signal_cloned().map(clone!(templates => move |items| items.map(|items| {
            if items.is_empty() {
                return empty_state("No templates found", "Sync with WhatsApp Business API or create a new template", None);
            }
            html!(TAG_DIV, {
                .class(["grid", "grid-3"])
                .children(items.iter().map(|template| template_card(&templates, template)))
            })
        }))))
    })
}

fn meta_line(label: &str, child: Dom) -> Dom {
    html!(TAG_P, {
        .children([
            html!("strong", { .text(&format!("{label}: ")) }),
            child,
        ])
    })
}

fn template_card(templates: &Rc<Templates>, template: &Template) -> Dom {
    let name = template.name.clone();
    html!(TAG_DIV, {
        .class("card")
        .children([
            html!(TAG_DIV, {
                .class("card-header")
                .children([
                    html!(TAG_H3, { .class("card-title").text(&template.name) }),
                    button("Delete", "btn btn-error btn-sm", clone!(templates => move || {
                        confirm_delete(&templates, name.clone());
                    })),
                ])
            }),
            html!(TAG_DIV, {
                .class("template-meta")
                .children([
                    meta_line("Category", html!(TAG_SPAN, { .text(template.category.as_deref().unwrap_or("N/A")) })),
                    meta_line("Language", html!(TAG_SPAN, { .text(template.language.as_deref().unwrap_or("N/A")) })),
                    meta_line("Status", chip(template.status_label())),
                ])
            }),
        ])
        .apply_if(template.components.is_some(), |dom| {
            let pretty = template.components_pretty().unwrap_or_default();
            dom.child(html!(TAG_DIV, {
                .class("template-preview")
                .children([
                    html!("h4", { .text("Components:") }),
                    html!("pre", { .class("template-components").text(&pretty) }),
                ])
            }))
        })
    })
}

async fn create_template(templates: Rc<Templates>, form: HtmlFormElement) {
    let mut fields = form_fields(&form);
    let components = fields.get(FIELD_COMPONENTS)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(serde_json::from_str::<Value>);
    match components {
        Some(Ok(components)) => {
            fields.insert(FIELD_COMPONENTS.to_string(), components);
        }
        Some(Err(err)) => {
            log::error!("template components: {err}");
            toast::error("Invalid JSON in components field");
            return;
        }
        None => {}
    }

    let busy = BusyButton::submit_of(&form, "Creating...");
    let result = match to_body(&fields) {
        Ok(body) => request_ok(API_TEMPLATES, Method::Post, Some(body)).await,
        Err(err) => Err(err),
    };
    drop(busy);

    match result {
        Ok(()) => {
            toast::success("Template created successfully");
            form.reset();
            templates.load();
        }
        Err(err) => {
            log::error!("create template: {err}");
            toast::error(&err.message_or("Failed to create template"));
        }
    }
}

async fn sync_templates(templates: Rc<Templates>) {
    let busy = BusyButton::start(get_by_id::<HtmlButtonElement>(ID_SYNC_TEMPLATES), "Syncing...");
    let result = request::<SyncResult>(API_TEMPLATES_SYNC, Method::Get, None).await;
    drop(busy);

    match result {
        Ok(result) => {
            log::info!("synced {} templates", result.synced);
            toast::success(&format!("Synced {} templates", result.synced));
            templates.load();
        }
        Err(err) => {
            log::error!("sync templates: {err}");
            toast::error("Failed to sync templates");
        }
    }
}

fn confirm_delete(templates: &Rc<Templates>, name: String) {
    Dialog::confirm("Are you sure you want to delete this template?", clone!(templates => move || {
        let templates = templates.clone();
        let name = name.clone();
        spawn_local(async move {
            let path = format!("{API_TEMPLATES}/{}", encode(&name));
            match request_ok(&path, Method::Delete, None).await {
                Ok(()) => {
                    toast::success("Template deleted successfully");
                    templates.load();
                }
                Err(err) => {
                    log::error!("delete template {name}: {err}");
                    toast::error("Failed to delete template");
                }
            }
        });
    }));
}
