use dominator::{Dom, events, html};
use futures_signals::signal::SignalExt;

use shared::routes::Route;

use crate::constants::{PROP_DATA_LINK, PROP_HREF, TAG_BUTTON, TAG_DIV, TAG_LINK};
use crate::pages::auth::logout;
use crate::state::SIGNED_IN;

fn css_class(label: &str) -> String {
    format!("app-header__{label}")
}

pub fn app_header() -> Dom {
    html!(TAG_DIV, {
        .class(css_class("container"))
        .children([
            html!(TAG_DIV, {
                .class(css_class("links"))
                .children([
                    link(Route::Dashboard, "Dashboard"),
                    link(Route::Inbox, "Inbox"),
                    link(Route::Contacts, "Contacts"),
                    link(Route::Campaigns, "Campaigns"),
                    link(Route::Templates, "Templates"),
                ])
            }),
            html!(TAG_DIV, {
                .class(css_class("session"))
                .children([
                    auth_link(Route::Login, "Login"),
                    auth_link(Route::Signup, "Sign up"),
                    html!(TAG_BUTTON, {
                        .attr("id", "logout-btn")
                        .class("btn")
                        .class("btn-ghost")
                        .text("Logout")
                        .visible_signal(SIGNED_IN.signal())
                        .event(|_: events::Click| logout())
                    }),
                ])
            }),
        ])
    })
}

fn link(route: Route, label: &str) -> Dom {
    html!(TAG_LINK, {
        .class(css_class("link"))
        .attr(PROP_HREF, &route.path())
        .attr(PROP_DATA_LINK, "")
        .text(label)
        .visible_signal(SIGNED_IN.signal())
    })
}

fn auth_link(route: Route, label: &str) -> Dom {
    html!(TAG_LINK, {
        .class(css_class("link"))
        .class("auth-link")
        .attr(PROP_HREF, &route.path())
        .attr(PROP_DATA_LINK, "")
        .text(label)
        .visible_signal(SIGNED_IN.signal().map(|signed_in| !signed_in))
    })
}
