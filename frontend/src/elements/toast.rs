use std::sync::atomic::{AtomicU64, Ordering};

use dominator::{Dom, html};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;

use shared::constants::TOAST_LIFETIME_MS;

use crate::constants::TAG_DIV;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

static TOAST: Lazy<Mutable<Option<Toast>>> = Lazy::new(|| Mutable::new(None));
static TOAST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Replaces whatever toast is showing; it hides itself after a few seconds.
pub fn show(message: &str, kind: ToastKind) {
    let id = TOAST_SEQ.fetch_add(1, Ordering::Relaxed);
    TOAST.set(Some(Toast { id, kind, message: message.to_string() }));

    let timer = Timeout::new(TOAST_LIFETIME_MS, move || {
        let mut current = TOAST.lock_mut();
        if current.as_ref().map(|toast| toast.id) == Some(id) {
            *current = None;
        }
    });
    timer.forget();
}

pub fn info(message: &str) {
    show(message, ToastKind::Info);
}

pub fn success(message: &str) {
    show(message, ToastKind::Success);
}

pub fn warning(message: &str) {
    show(message, ToastKind::Warning);
}

pub fn error(message: &str) {
    show(message, ToastKind::Error);
}

pub fn toast_view() -> Dom {
    html!(TAG_DIV, {
        .attr("id", "toast")
        .attr("role", "status")
        .child_signal(TOAST.signal_cloned().map(|toast| toast.map(|toast| {
            html!(TAG_DIV, {
                .class("toast")
                .class(toast.kind.class())
                .class("show")
                .text(&toast.message)
            })
        })))
    })
}
