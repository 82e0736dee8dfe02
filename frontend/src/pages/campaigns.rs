use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlFormElement};

use shared::constants::{API_CAMPAIGNS, API_CAMPAIGNS_CREATE, API_TEMPLATES};
use shared::routes::Route;
use shared::types::{Audience, Campaign, CampaignAction, CampaignBoard, CreatedCampaign, NewCampaign, StatusPatch, StatusResult, Template};

use crate::connect_fetch::{get_listing, request, to_body, FetchError, Method};
use crate::constants::{CLASS_ACTIVE, EVENT_CLICK, EVENT_SUBMIT, ID_CAMPAIGNS_LIST, ID_CREATE_CAMPAIGN_FORM, ID_TEMPLATE_SELECT, PROP_VALUE, SELECTOR_FILTER_BUTTONS, TAG_DIV, TAG_OPTION};
use crate::elements::toast;
use crate::elements::widgets::{app_link, button, cell, cell_children, cell_text, chip, empty_state, or_dash, row, table};
use crate::router::{go, LiveTarget, View};
use crate::utils::{encode, field, form_fields, format_day, from_dataset, query_selector_all, set_class, BusyButton};

const FILTER_ALL: &str = "all";

/// Campaigns held in memory by the list and detail pages. Status changes,
/// from an action or a push event, are patched in place.
#[derive(Default)]
pub struct Campaigns {
    pub board: Mutable<CampaignBoard>,
    listed: Mutable<bool>,
}

impl Campaigns {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn patch(&self, id: &str, status: &str) -> StatusPatch {
        self.board.lock_mut().apply_status(id, status)
    }

    fn load_list(self: &Rc<Self>, status: String) {
        let this = self.clone();
        spawn_local(async move {
            let path = if status.is_empty() {
                API_CAMPAIGNS.to_string()
            } else {
                format!("{API_CAMPAIGNS}?status={}", encode(&status))
            };
            match get_listing::<Campaign>(&path, "campaigns").await {
                Ok(listing) => {
                    this.board.lock_mut().list = listing.items;
                    this.listed.set_neq(true);
                }
                Err(err) => {
                    log::error!("campaigns [{status}]: {err}");
                    toast::error("Failed to load campaigns");
                }
            }
        });
    }

    /// Posts `action` for campaign `id` and patches the returned status.
    pub fn run_action(self: &Rc<Self>, id: String, action: CampaignAction) {
        let this = self.clone();
        spawn_local(async move {
            toast::info(&format!("{} campaign...", action.in_progress()));
            let path = format!("{API_CAMPAIGNS}/{}/{}", encode(&id), action.as_str());
            match request::<StatusResult>(&path, Method::Post, None).await {
                Ok(result) => {
                    toast::success(&format!("Campaign {} successfully", action.done()));
                    this.patch(&id, &result.status);
                }
                Err(err) => {
                    log::error!("campaign {id} {}: {err}", action.as_str());
                    toast::error(&err.message_or(&format!("Failed to {} campaign", action.as_str())));
                }
            }
        });
    }
}

impl LiveTarget for Campaigns {
    fn on_campaign(self: Rc<Self>, id: &str, status: &str) {
        self.patch(id, status);
    }
}

/// Start, pause and complete buttons allowed by the campaign's status.
pub fn action_buttons(campaigns: &Rc<Campaigns>, campaign: &Campaign, size: &str, suffix: &str) -> Vec<Dom> {
    let mut buttons = vec![];
    let mut push = |action: CampaignAction, label: &str, class: &str| {
        let id = campaign.id.clone();
        buttons.push(button(
            &format!("{label}{suffix}"),
            &format!("btn {class}{size}"),
            clone!(campaigns => move || campaigns.run_action(id.clone(), action)),
        ));
    };
    if campaign.can_start() {
        push(CampaignAction::Start, "Start", "btn-success");
    }
    if campaign.can_pause() {
        push(CampaignAction::Pause, "Pause", "btn-warning");
    }
    if campaign.can_complete() {
        push(CampaignAction::Complete, "Complete", "btn-secondary");
    }
    buttons
}

// === list

pub fn init_list(view: &Rc<View>) {
    let campaigns = Campaigns::new();

    let visible = map_ref! {
        let board = campaigns.board.signal_cloned(),
        let listed = campaigns.listed.signal() => {
            if *listed { Some(board.list.clone()) } else { None }
        }
    };
    view.mount(ID_CAMPAIGNS_LIST, html!(TAG_DIV, {
        .child_signal(visible.map(clone!(campaigns => move |list| {
            list.map(|list| campaigns_table(&campaigns, &list))
        })))
    }));

    let filters = query_selector_all(SELECTOR_FILTER_BUTTONS);
    for filter in filters.iter() {
        view.listen(filter, EVENT_CLICK, clone!(campaigns, filters, filter => move |_: Event| {
            for other in filters.iter() {
                set_class(other, CLASS_ACTIVE, false);
            }
            set_class(&filter, CLASS_ACTIVE, true);
            let status = from_dataset(&filter, "status");
            let status = if status.is_empty() || status == FILTER_ALL { String::new() } else { status };
            campaigns.load_list(status);
        }));
    }

    view.set_live_target(campaigns.clone());
    campaigns.load_list(String::new());
}

fn campaigns_table(campaigns: &Rc<Campaigns>, list: &[Campaign]) -> Dom {
    if list.is_empty() {
        return empty_state(
            "No campaigns found",
            "Create your first campaign to get started",
            Some(("Create Campaign", &Route::CampaignNew.path())),
        );
    }

    let rows = list.iter().map(|campaign| {
        let href = Route::CampaignDetail(campaign.id.clone()).path();
        let mut actions = action_buttons(campaigns, campaign, " btn-sm", "");
        actions.push(app_link(&href, "View", "btn btn-ghost btn-sm"));
        row(vec![
            cell(app_link(&href, &campaign.name, "font-medium text-primary")),
            cell_text(&or_dash(campaign.template_name.as_deref())),
            cell(chip(&campaign.status)),
            cell_text(&campaign.created_at.as_ref().map(format_day).unwrap_or_else(|| "-".to_string())),
            cell_text(&campaign.progress()),
            cell_children(actions),
        ])
    }).collect();

    table(&["Name", "Template", "Status", "Created", "Progress", "Actions"], rows)
}

// === new

pub fn init_new(view: &Rc<View>) {
    view.listen_id(ID_CREATE_CAMPAIGN_FORM, EVENT_SUBMIT, |e: Event| {
        e.prevent_default();
        if let Some(form) = e.current_target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) {
            spawn_local(create_campaign(form));
        }
    });

    view.mount(ID_TEMPLATE_SELECT, option("", "Select a template"));

    let view = view.clone();
    spawn_local(async move {
        match get_listing::<Template>(API_TEMPLATES, "templates").await {
            Ok(listing) => template_options(&view, &listing.items),
            Err(err) => log::error!("templates for campaign form: {err}"),
        }
    });
}

fn template_options(view: &View, templates: &[Template]) {
    for template in templates {
        view.mount(ID_TEMPLATE_SELECT, option(&template.name, &template.name));
    }
}

fn option(value: &str, label: &str) -> Dom {
    html!(TAG_OPTION, {
        .attr(PROP_VALUE, value)
        .text(label)
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

async fn create_campaign(form: HtmlFormElement) {
    let fields = form_fields(&form);
    let campaign = NewCampaign {
        name: field(&fields, "name"),
        template_name: field(&fields, "templateName"),
        audience: Audience {
            group: non_empty(field(&fields, "targetGroup")),
            query: non_empty(field(&fields, "targetQuery")),
        },
        schedule_at: non_empty(field(&fields, "scheduleAt")),
    };

    let busy = BusyButton::submit_of(&form, "Creating...");
    let result = post_campaign(&campaign).await;
    drop(busy);

    match result {
        Ok(created) => {
            log::info!("campaign {} created", created.id);
            toast::success("Campaign created successfully");
            go(&Route::CampaignDetail(created.id).path());
        }
        Err(err) => {
            log::error!("create campaign: {err}");
            toast::error(&err.message_or("Failed to create campaign"));
        }
    }
}

async fn post_campaign(campaign: &NewCampaign) -> Result<CreatedCampaign, FetchError> {
    let body = to_body(campaign)?;
    request(API_CAMPAIGNS_CREATE, Method::Post, Some(body)).await
}
