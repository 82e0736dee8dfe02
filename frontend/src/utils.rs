use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Location, Node, Window};

use crate::constants::SELECTOR_SUBMIT;

fn get_window() -> Option<Window> {
    web_sys::window()
}

fn get_document() -> Option<Document> {
    get_window().and_then(|w| w.document())
}

fn get_value_from_input(element: JsValue) -> String {
    if let Some(element) = element.dyn_ref::<HtmlInputElement>() {
        element.value()
    } else if let Some(element) = element.dyn_ref::<HtmlTextAreaElement>() {
        element.value()
    } else if let Some(element) = element.dyn_ref::<HtmlSelectElement>() {
        element.value()
    } else {
        "".to_string()
    }
}

pub fn get_location() -> Option<Location> {
    get_window().map(|w| w.location())
}

pub fn current_path() -> String {
    get_location()
        .and_then(|l| l.pathname().ok())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| "/login".to_string())
}

pub fn push_history(path: &str) {
    if let Some(history) = get_window().and_then(|w| w.history().ok()) {
        history.push_state_with_url(&JsValue::NULL, "", Some(path)).ok();
    }
}

pub fn replace_history(path: &str) {
    if let Some(history) = get_window().and_then(|w| w.history().ok()) {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path)).ok();
    }
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    get_document().and_then(|d| d.get_element_by_id(id))
}

pub fn get_by_id<T: JsCast>(id: &str) -> Option<T> {
    get_element_by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_selector_all(selectors: &str) -> Vec<HtmlElement> {
    let mut list: Vec<HtmlElement> = Vec::new();
    if let Some(node_list) = get_document().and_then(|d| d.query_selector_all(selectors).ok()) {
        for ind in 0..node_list.length() {
            if let Some(html_elem) = get_html_element(get_element_from_node(node_list.get(ind))) {
                list.push(html_elem);
            }
        }
    }
    list
}

fn get_html_element(el: Option<Element>) -> Option<HtmlElement> {
    el.and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn get_element_from_node(el: Option<Node>) -> Option<Element> {
    el.and_then(|el| el.dyn_into::<Element>().ok())
}

pub fn from_dataset(element: &HtmlElement, key: &str) -> String {
    element.dataset().get(key).unwrap_or_default()
}

pub fn get_value_in(form: &HtmlFormElement, name: &str) -> String {
    form.query_selector(&format!("[name={name}]"))
        .ok()
        .flatten()
        .map(|element| get_value_from_input(JsValue::from(element)))
        .unwrap_or_default()
}

pub fn set_value_in(form: &HtmlFormElement, name: &str, value: &str) {
    if let Ok(Some(element)) = form.query_selector(&format!("[name={name}]")) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }
}

/// Every named field of the form as a JSON string value.
pub fn form_fields(form: &HtmlFormElement) -> Map<String, Value> {
    let mut fields = Map::new();
    let entries = web_sys::FormData::new_with_form(form)
        .ok()
        .and_then(|data| js_sys::try_iter(&data).ok().flatten());
    if let Some(entries) = entries {
        for entry in entries.flatten() {
            let pair = js_sys::Array::from(&entry);
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.insert(key, Value::String(value));
            }
        }
    }
    fields
}

pub fn field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).and_then(Value::as_str).unwrap_or_default().trim().to_string()
}

pub fn encode(component: &str) -> String {
    js_sys::encode_uri_component(component).into()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    if on {
        list.add_1(class).ok();
    } else {
        list.remove_1(class).ok();
    }
}

pub fn scroll_to_bottom(id: &str) {
    if let Some(element) = get_element_by_id(id) {
        element.set_scroll_top(element.scroll_height());
    }
}

pub fn now() -> Value {
    Value::from(js_sys::Date::now())
}

/// `YYYY-MM-DD HH:MM` in local time. Accepts ISO strings and epoch millis.
fn format_date(value: &Value) -> String {
    match parse_date(value) {
        Some(date) => format!(
            "{} {:02}:{:02}",
            day(&date),
            date.get_hours(),
            date.get_minutes()
        ),
        None => "-".to_string(),
    }
}

pub fn format_day(value: &Value) -> String {
    parse_date(value).map(|date| day(&date)).unwrap_or_else(|| "-".to_string())
}

pub fn format_optional_date(value: Option<&Value>, missing: &str) -> String {
    match value {
        Some(value) if !value.is_null() => format_date(value),
        _ => missing.to_string(),
    }
}

fn parse_date(value: &Value) -> Option<js_sys::Date> {
    let date = match value {
        Value::String(text) => js_sys::Date::new(&JsValue::from_str(text)),
        Value::Number(millis) => js_sys::Date::new(&JsValue::from_f64(millis.as_f64()?)),
        _ => return None,
    };
    if date.get_time().is_nan() {
        None
    } else {
        Some(date)
    }
}

fn day(date: &js_sys::Date) -> String {
    format!("{}-{:02}-{:02}", date.get_full_year(), date.get_month() + 1, date.get_date())
}

/// Disables a submit button and swaps its label until dropped.
pub struct BusyButton {
    button: HtmlButtonElement,
    label: Option<String>,
}

impl BusyButton {
    pub fn start(button: Option<HtmlButtonElement>, busy_label: &str) -> Option<Self> {
        let button = button?;
        let label = button.text_content();
        button.set_text_content(Some(busy_label));
        button.set_disabled(true);
        Some(Self { button, label })
    }

    pub fn submit_of(form: &HtmlFormElement, busy_label: &str) -> Option<Self> {
        let button = form.query_selector(SELECTOR_SUBMIT)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
        Self::start(button, busy_label)
    }
}

impl Drop for BusyButton {
    fn drop(&mut self) {
        self.button.set_text_content(self.label.as_deref());
        self.button.set_disabled(false);
    }
}
