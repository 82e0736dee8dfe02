use dominator::{Dom, events, html};

use shared::utils::class_token;

use crate::constants::{PROP_DATA_LINK, PROP_HREF, TAG_BUTTON, TAG_DIV, TAG_H3, TAG_LINK, TAG_P, TAG_SPAN, TAG_TABLE, TAG_TD, TAG_TH, TAG_TR};

pub fn chip(status: &str) -> Dom {
    html!(TAG_SPAN, {
        .class("chip")
        .apply(|dom| match class_token(status) {
            Some(token) => dom.class(token.as_str()),
            None => dom,
        })
        .text(status)
    })
}

pub fn stat_card(value: impl ToString, label: &str) -> Dom {
    html!(TAG_DIV, {
        .class("stat-card")
        .children([
            html!(TAG_DIV, {
                .class("stat-number")
                .text(&value.to_string())
            }),
            html!(TAG_DIV, {
                .class("stat-label")
                .text(label)
            }),
        ])
    })
}

pub fn empty_state(title: &str, text: &str, action: Option<(&str, &str)>) -> Dom {
    html!(TAG_DIV, {
        .class("empty-state")
        .children([
            html!(TAG_H3, { .text(title) }),
            html!(TAG_P, { .text(text) }),
        ])
        .apply(|dom| match action {
            Some((label, href)) => dom.child(app_link(href, label, "btn btn-primary")),
            None => dom,
        })
    })
}

/// Anchor handled by the client-side router.
pub fn app_link(href: &str, label: &str, class: &str) -> Dom {
    html!(TAG_LINK, {
        .attr(PROP_HREF, href)
        .attr(PROP_DATA_LINK, "")
        .apply_if(!class.is_empty(), |dom| dom.attr("class", class))
        .text(label)
    })
}

pub fn button(label: &str, class: &str, click: impl FnMut() + 'static) -> Dom {
    let mut click = click;
    html!(TAG_BUTTON, {
        .attr("class", class)
        .attr("type", "button")
        .text(label)
        .event(move |_: events::Click| click())
    })
}

pub fn table(headers: &[&str], rows: Vec<Dom>) -> Dom {
    html!(TAG_DIV, {
        .class("table-container")
        .child(html!(TAG_TABLE, {
            .class("table")
            .children([
                html!("thead", {
                    .child(html!(TAG_TR, {
                        .children(headers.iter().map(|label| html!(TAG_TH, { .text(label) })))
                    }))
                }),
                html!("tbody", { .children(rows) }),
            ])
        }))
    })
}

pub fn row(cells: Vec<Dom>) -> Dom {
    html!(TAG_TR, { .children(cells) })
}

pub fn cell_text(text: &str) -> Dom {
    html!(TAG_TD, { .text(text) })
}

pub fn cell(child: Dom) -> Dom {
    html!(TAG_TD, { .child(child) })
}

pub fn cell_children(children: Vec<Dom>) -> Dom {
    html!(TAG_TD, {
        .child(html!(TAG_DIV, {
            .class("flex")
            .class("gap-1")
            .children(children)
        }))
    })
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}
