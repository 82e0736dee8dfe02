use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use shared::constants::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use shared::routes::Route;
use shared::types::{listing, ErrorBody, Listing};

use crate::connect_sse::stop_live;
use crate::router::go;
use crate::state::{refresh_signed_in, session};
use crate::utils::current_path;

const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Server-provided message when there is one, otherwise `default`.
    pub fn message_or(&self, default: &str) -> String {
        match self {
            FetchError::Status { message: Some(message), .. } if !message.is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}

impl From<JsValue> for FetchError {
    fn from(err: JsValue) -> Self {
        FetchError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

pub fn to_body<B: Serialize>(body: &B) -> Result<String, FetchError> {
    serde_json::to_string(body).map_err(|err| FetchError::Decode(err.to_string()))
}

async fn send(url: &str, method: Method, body: Option<String>, token: Option<&str>) -> Result<Response, FetchError> {
    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)?;
    if let Some(token) = token {
        request.headers().set(HEADER_AUTHORIZATION, &format!("Bearer {token}"))?;
    }

    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into::<Response>().map_err(|_| FetchError::Decode("not a response".to_string()))
}

/// Bearer-authenticated request against the API base. A 401 ends the
/// session and sends the user to `/login`; the response is still returned.
pub async fn auth_fetch(path: &str, method: Method, body: Option<String>) -> Result<Response, FetchError> {
    let session = session();
    let url = session.config().api_url(path);
    let token = session.token();
    let resp = send(&url, method, body, Some(&token)).await?;
    if resp.status() == STATUS_UNAUTHORIZED {
        handle_unauthorized();
    }
    Ok(resp)
}

fn handle_unauthorized() {
    let redirect = session().reject(&current_path());
    refresh_signed_in();
    if redirect {
        log::info!("session rejected by server, back to login");
        stop_live();
        go(&Route::Login.path());
    }
}

async fn read_text(resp: &Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string().ok_or_else(|| FetchError::Decode("body is not text".to_string()))
}

async fn read_json<T: DeserializeOwned>(resp: &Response) -> Result<T, FetchError> {
    let text = read_text(resp).await?;
    serde_json::from_str(&text).map_err(|err| FetchError::Decode(err.to_string()))
}

async fn check(resp: Response) -> Result<Response, FetchError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = read_json::<ErrorBody>(&resp).await.ok().and_then(|body| body.message);
    Err(FetchError::Status { status, message })
}

async fn checked_auth(path: &str, method: Method, body: Option<String>) -> Result<Response, FetchError> {
    let resp = auth_fetch(path, method, body).await?;
    if resp.status() == STATUS_UNAUTHORIZED {
        return Err(FetchError::Unauthorized);
    }
    check(resp).await
}

pub async fn request<T: DeserializeOwned>(path: &str, method: Method, body: Option<String>) -> Result<T, FetchError> {
    let resp = checked_auth(path, method, body).await?;
    read_json(&resp).await
}

/// Like [`request`], for endpoints whose body is not needed.
pub async fn request_ok(path: &str, method: Method, body: Option<String>) -> Result<(), FetchError> {
    checked_auth(path, method, body).await.map(|_| ())
}

pub async fn get_listing<T: DeserializeOwned>(path: &str, key: &str) -> Result<Listing<T>, FetchError> {
    let value = request::<serde_json::Value>(path, Method::Get, None).await?;
    listing(value, key).map_err(|err| FetchError::Decode(err.to_string()))
}

/// Unauthenticated POST used by the login and signup forms.
pub async fn public_post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, FetchError> {
    let url = session().config().api_url(path);
    let resp = send(&url, Method::Post, Some(to_body(body)?), None).await?;
    let resp = check(resp).await?;
    read_json(&resp).await
}

/// Static page fragments served alongside the app.
pub async fn fetch_fragment(url: &str) -> Result<String, FetchError> {
    let resp = check(send(url, Method::Get, None, None).await?).await?;
    read_text(&resp).await
}
