use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::{Mutable, SignalExt};
use wasm_bindgen_futures::spawn_local;

use shared::constants::{API_CAMPAIGNS, RECENT_CAMPAIGNS};
use shared::routes::Route;
use shared::types::{Campaign, CampaignStats};

use crate::connect_fetch::get_listing;
use crate::constants::{ID_DASHBOARD_STATS, ID_RECENT_CAMPAIGNS, TAG_DIV};
use crate::elements::toast;
use crate::elements::widgets::{app_link, cell, cell_text, chip, empty_state, row, stat_card, table};
use crate::router::View;
use crate::utils::format_day;

pub fn init(view: &Rc<View>) {
    let campaigns: Mutable<Option<Vec<Campaign>>> = Mutable::new(None);

    view.mount(ID_DASHBOARD_STATS, html!(TAG_DIV, {
        .class("stats-grid")
        .children_signal_vec(campaigns.signal_ref(|list| {
            list.as_deref().map(stats_cards).unwrap_or_default()
        }).to_signal_vec())
    }));

    view.mount(ID_RECENT_CAMPAIGNS, html!(TAG_DIV, {
        .child_signal(campaigns.signal_ref(|list| list.as_deref().map(recent_campaigns)))
    }));

    spawn_local(async move {
        match get_listing::<Campaign>(API_CAMPAIGNS, "campaigns").await {
            Ok(listing) => campaigns.set(Some(listing.items)),
            Err(err) => {
                log::error!("dashboard load failed: {err}");
                toast::error("Failed to load dashboard data");
            }
        }
    });
}

fn stats_cards(campaigns: &[Campaign]) -> Vec<Dom> {
    let stats = CampaignStats::from_campaigns(campaigns);
    vec![
        stat_card(stats.total, "Total Campaigns"),
        stat_card(stats.running, "Running"),
        stat_card(stats.completed, "Completed"),
        stat_card(stats.failed, "Failed"),
    ]
}

fn recent_campaigns(campaigns: &[Campaign]) -> Dom {
    if campaigns.is_empty() {
        return empty_state(
            "No campaigns yet",
            "Create your first campaign to get started",
            Some(("Create Campaign", &Route::CampaignNew.path())),
        );
    }

    let rows = campaigns.iter()
        .take(RECENT_CAMPAIGNS)
        .map(|campaign| {
            let href = Route::CampaignDetail(campaign.id.clone()).path();
            row(vec![
                cell(app_link(&href, &campaign.name, "text-primary font-medium")),
                cell(chip(&campaign.status)),
                cell_text(&campaign.created_at.as_ref().map(format_day).unwrap_or_else(|| "-".to_string())),
                cell(app_link(&href, "View", "btn btn-secondary btn-sm")),
            ])
        })
        .collect();

    table(&["Name", "Status", "Created", "Actions"], rows)
}
