use std::rc::Rc;

use dominator::{Dom, events, html};
use futures_signals::signal::{Signal, SignalExt};
use futures_signals::signal_vec::{MutableVec, SignalVecExt};

use crate::constants::{TAG_BUTTON, TAG_DIV};

thread_local! {
    static DIALOGS: MutableVec<Dialog> = MutableVec::new();
}

/// Yes/No confirmation shown over the page.
#[derive(Clone)]
pub struct Dialog {
    pub message: String,
    pub confirm: Rc<dyn Fn()>,
}

impl Dialog {
    pub fn confirm(message: &str, confirm: impl Fn() + 'static) {
        let dialog = Self {
            message: message.to_string(),
            confirm: Rc::new(confirm),
        };
        DIALOGS.with(|dialogs| dialogs.lock_mut().push_cloned(dialog));
    }
}

// ===

fn css_class(label: &str) -> String {
    format!("dialogs__{label}")
}

pub fn dialogs() -> impl Signal<Item=Option<Dom>> {
    DIALOGS.with(|dialogs| dialogs.signal_vec_cloned().to_signal_cloned().map(current_element))
}

fn current_element(list: Vec<Dialog>) -> Option<Dom> {
    list.last().map(dialog_confirm)
}

fn dialog_confirm(data: &Dialog) -> Dom {
    let confirm = data.confirm.clone();
    html!(TAG_DIV, {
        .class(css_class("back"))
        .child(html!(TAG_DIV, {
            .class(css_class("container"))
            .children([
                html!(TAG_DIV, {
                    .class(css_class("body"))
                    .text(&data.message)
                }),
                html!(TAG_DIV, {
                    .class(css_class("footer"))
                    .children([
                        html!(TAG_BUTTON, {
                            .class("btn")
                            .class("btn-error")
                            .text("Yes")
                            .attr("aria-label", "confirm")
                            .event(move |_: events::Click| {
                                dialog_close();
                                confirm();
                            })
                        }),
                        html!(TAG_BUTTON, {
                            .class("btn")
                            .class("btn-ghost")
                            .text("No")
                            .attr("aria-label", "cancel")
                            .event(|_: events::Click| dialog_close())
                        }),
                    ])
                }),
            ])
        }))
    })
}

fn dialog_close() {
    DIALOGS.with(|dialogs| {
        let mut dialogs = dialogs.lock_mut();
        let count = dialogs.len();
        if count > 0 {
            dialogs.remove(count - 1);
        }
    });
}
