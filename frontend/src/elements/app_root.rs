use dominator::{Dom, html};

use crate::constants::{ID_NAV, TAG_DIV};
use crate::dialog::dialogs::dialogs;
use crate::elements::app_header::app_header;
use crate::elements::toast::toast_view;
use crate::utils::get_element_by_id;

/// Overlays that live for the whole session: confirm dialogs and the toast.
pub fn app_root() -> Dom {
    html!(TAG_DIV, {
        .class("app-root")
        .child(toast_view())
        .child_signal(dialogs())
    })
}

/// Mounts the navigation bar into `#nav`, or at the top of the body when the
/// shell has no such slot.
pub fn mount_nav() {
    match get_element_by_id(ID_NAV) {
        Some(nav) => {
            dominator::append_dom(&nav, app_header());
        }
        None => {
            dominator::append_dom(&dominator::body(), app_header());
        }
    }
}
