use std::cell::Cell;
use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use shared::constants::API_CAMPAIGNS;
use shared::types::{Audience, Campaign, CampaignCost, CampaignMessage, CampaignMetrics};
use shared::utils::money;

use crate::connect_fetch::{get_listing, request, Method};
use crate::constants::{CLASS_ACTIVE, EVENT_CLICK, ID_CAMPAIGN_HEADER, ID_COST_CONTENT, ID_MESSAGES_CONTENT, ID_OVERVIEW_CONTENT, SELECTOR_TAB_CONTENTS, SELECTOR_TABS, TAG_DIV, TAG_H3, TAG_P, TAG_SPAN, TAG_TABLE, TAG_TD, TAG_TR};
use crate::elements::toast;
use crate::elements::widgets::{button, cell, cell_text, chip, empty_state, or_dash, row, stat_card, table};
use crate::pages::campaigns::{action_buttons, Campaigns};
use crate::router::{LiveTarget, View};
use crate::utils::{encode, format_optional_date, from_dataset, get_element_by_id, query_selector_all, set_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Messages,
    Cost,
}

impl Tab {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "overview" => Some(Tab::Overview),
            "messages" => Some(Tab::Messages),
            "cost" => Some(Tab::Cost),
            _ => None,
        }
    }

    fn content_id(&self) -> &'static str {
        match self {
            Tab::Overview => ID_OVERVIEW_CONTENT,
            Tab::Messages => ID_MESSAGES_CONTENT,
            Tab::Cost => ID_COST_CONTENT,
        }
    }
}

/// One campaign with lazily loaded tab data.
struct Detail {
    id: String,
    campaigns: Rc<Campaigns>,
    tab: Cell<Tab>,
    metrics: Mutable<Option<CampaignMetrics>>,
    messages: Mutable<Option<Vec<CampaignMessage>>>,
    cost: Mutable<Option<CampaignCost>>,
}

impl Detail {
    fn path(&self, section: &str) -> String {
        if section.is_empty() {
            format!("{API_CAMPAIGNS}/{}", encode(&self.id))
        } else {
            format!("{API_CAMPAIGNS}/{}/{section}", encode(&self.id))
        }
    }

    fn load(self: &Rc<Self>) {
        let this = self.clone();
        spawn_local(async move {
            match request::<Campaign>(&this.path(""), Method::Get, None).await {
                Ok(campaign) => {
                    this.campaigns.board.lock_mut().current = Some(campaign);
                    this.load_tab();
                }
                Err(err) => {
                    log::error!("campaign {}: {err}", this.id);
                    toast::error("Failed to load campaign");
                }
            }
        });
    }

    /// Failures only reach the log; the tab keeps its previous content.
    fn load_tab(self: &Rc<Self>) {
        let this = self.clone();
        spawn_local(async move {
            match this.tab.get() {
                Tab::Overview => match request::<CampaignMetrics>(&this.path("metrics"), Method::Get, None).await {
                    Ok(metrics) => this.metrics.set(Some(metrics)),
                    Err(err) => log::error!("campaign {} metrics: {err}", this.id),
                },
                Tab::Messages => match get_listing::<CampaignMessage>(&this.path("messages"), "messages").await {
                    Ok(listing) => this.messages.set(Some(listing.items)),
                    Err(err) => log::error!("campaign {} messages: {err}", this.id),
                },
                Tab::Cost => match request::<CampaignCost>(&this.path("cost"), Method::Get, None).await {
                    Ok(cost) => this.cost.set(Some(cost)),
                    Err(err) => log::error!("campaign {} cost: {err}", this.id),
                },
            }
        });
    }
}

impl LiveTarget for Detail {
    fn on_campaign(self: Rc<Self>, id: &str, status: &str) {
        if self.campaigns.patch(id, status).current {
            self.load_tab();
        }
    }
}

pub fn init(view: &Rc<View>, id: &str) {
    let detail = Rc::new(Detail {
        id: id.to_string(),
        campaigns: Campaigns::new(),
        tab: Cell::new(Tab::Overview),
        metrics: Mutable::new(None),
        messages: Mutable::new(None),
        cost: Mutable::new(None),
    });

    view.mount(ID_CAMPAIGN_HEADER, header(&detail));
    view.mount(ID_OVERVIEW_CONTENT, overview(&detail));
    view.mount(ID_MESSAGES_CONTENT, messages(&detail));
    view.mount(ID_COST_CONTENT, cost(&detail));

    let tabs = query_selector_all(SELECTOR_TABS);
    for tab in tabs.iter() {
        view.listen(tab, EVENT_CLICK, clone!(detail, tabs, tab => move |_: Event| {
            let Some(selected) = Tab::from_name(&from_dataset(&tab, "tab")) else {
                return;
            };
            for other in tabs.iter() {
                set_class(other, CLASS_ACTIVE, false);
            }
            set_class(&tab, CLASS_ACTIVE, true);
            for content in query_selector_all(SELECTOR_TAB_CONTENTS) {
                set_class(&content, CLASS_ACTIVE, false);
            }
            if let Some(content) = get_element_by_id(selected.content_id()) {
                set_class(&content, CLASS_ACTIVE, true);
                detail.tab.set(selected);
                detail.load_tab();
            }
        }));
    }

    view.set_live_target(detail.clone());
    detail.load();
}

fn header(detail: &Rc<Detail>) -> Dom {
    let current = detail.campaigns.board.signal_ref(|board| board.current.clone());
    html!(TAG_DIV, {
        .class("campaign-header")
        .child_signal(current.map(clone!(detail => move |campaign| campaign.map(|campaign| {
            let mut actions = action_buttons(&detail.campaigns, &campaign, "", " Campaign");
            actions.push(button("Refresh", "btn btn-ghost", clone!(detail => move || detail.load())));
            html!(TAG_DIV, {
                .class("flex")
                .class("justify-between")
                .children([
                    html!(TAG_DIV, {
                        .children([
                            html!("h1", {
                                .class(["text-2xl", "font-bold", "mb-1"])
                                .text(&campaign.name)
                            }),
                            html!(TAG_DIV, {
                                .class(["flex", "items-center", "gap-2"])
                                .children([
                                    chip(&campaign.status),
                                    html!(TAG_SPAN, {
                                        .class("text-neutral-500")
                                        .text(&format!("Created {}", format_optional_date(campaign.created_at.as_ref(), "-")))
                                    }),
                                ])
                            }),
                        ])
                    }),
                    html!(TAG_DIV, {
                        .class(["flex", "gap-2"])
                        .children(actions)
                    }),
                ])
            })
        }))))
    })
}

fn overview(detail: &Rc<Detail>) -> Dom {
    let state = map_ref! {
        let metrics = detail.metrics.signal_cloned(),
        let board = detail.campaigns.board.signal_cloned() => {
            metrics.clone().zip(board.current.clone())
        }
    };
    html!(TAG_DIV, {
        .child_signal(state.map(|state| state.map(|(metrics, campaign)| overview_view(&metrics, &campaign))))
    })
}

fn detail_line(label: &str, value: &str) -> Dom {
    html!(TAG_P, {
        .children([
            html!("strong", { .text(&format!("{label}:")) }),
            html!(TAG_SPAN, { .text(&format!(" {value}")) }),
        ])
    })
}

fn overview_view(metrics: &CampaignMetrics, campaign: &Campaign) -> Dom {
    html!(TAG_DIV, {
        .children([
            html!(TAG_DIV, {
                .class(["grid", "grid-4", "mb-3"])
                .children([
                    stat_card(metrics.sent, "Sent"),
                    stat_card(metrics.delivered, "Delivered"),
                    stat_card(metrics.read, "Read"),
                    stat_card(metrics.failed, "Failed"),
                ])
            }),
            html!(TAG_DIV, {
                .class("card")
                .children([
                    html!(TAG_H3, { .class("card-title").text("Campaign Details") }),
                    html!(TAG_DIV, {
                        .class(["grid", "grid-2"])
                        .children([
                            html!(TAG_DIV, {
                                .children([
                                    detail_line("Template", campaign.template_name.as_deref().unwrap_or("N/A")),
                                    detail_line("Target Audience", &Audience::describe(campaign.audience.as_ref())),
                                    detail_line("Scheduled", &format_optional_date(campaign.schedule_at.as_ref(), "Immediate")),
                                ])
                            }),
                            html!(TAG_DIV, {
                                .children([
                                    detail_line("Started", &format_optional_date(campaign.started_at.as_ref(), "Not started")),
                                    detail_line("Completed", &format_optional_date(campaign.completed_at.as_ref(), "Not completed")),
                                    detail_line("Total Recipients", &metrics.total.to_string()),
                                ])
                            }),
                        ])
                    }),
                ])
            }),
        ])
    })
}

fn messages(detail: &Rc<Detail>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(detail.messages.signal_cloned().map(|messages| messages.map(|messages| messages_view(&messages))))
    })
}

fn messages_view(messages: &[CampaignMessage]) -> Dom {
    if messages.is_empty() {
        return empty_state("No messages sent yet", "Messages will appear here once the campaign starts", None);
    }
    let rows = messages.iter().map(|message| {
        row(vec![
            cell_text(&message.wa_id),
            cell_text(&or_dash(message.message_id.as_deref())),
            cell(chip(&message.status)),
            cell_text(&format_optional_date(message.sent_at.as_ref(), "-")),
            cell_text(&format_optional_date(message.last_status_at.as_ref(), "-")),
        ])
    }).collect();
    table(&["WhatsApp ID", "Message ID", "Status", "Sent At", "Last Updated"], rows)
}

fn cost(detail: &Rc<Detail>) -> Dom {
    html!(TAG_DIV, {
        .child_signal(detail.cost.signal_cloned().map(|cost| cost.map(|cost| cost_view(&cost))))
    })
}

fn cost_view(cost: &CampaignCost) -> Dom {
    let breakdown = if cost.items.is_empty() {
        empty_state("No cost data available", "Cost information will be available after the campaign starts", None)
    } else {
        let rows = cost.items.iter().map(|item| {
            row(vec![
                cell_text(&item.category),
                cell_text(&item.count.to_string()),
                cell_text(&money(item.unit_cost)),
                cell_text(&money(item.subtotal)),
            ])
        }).collect();
        html!(TAG_DIV, {
            .children([
                table(&["Category", "Count", "Unit Cost", "Subtotal"], rows),
                html!(TAG_TABLE, {
                    .class("table")
                    .class("cost-total")
                    .child(html!(TAG_TR, {
                        .children([
                            html!(TAG_TD, { .attr("colspan", "3").text("Total") }),
                            html!(TAG_TD, { .text(&money(Some(cost.total))) }),
                        ])
                    }))
                }),
            ])
        })
    };

    html!(TAG_DIV, {
        .class("card")
        .children([
            html!(TAG_H3, { .class("card-title").text("Cost Breakdown") }),
            detail_line("Pricing Model", cost.model.as_deref().filter(|m| !m.is_empty()).unwrap_or("Standard")),
            breakdown,
        ])
    })
}
