//! Request construction from a test definition

use apicheck_core::ApiTest;
use reqwest::blocking::{Client, Request};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid HTTP method '{0}'")]
    Method(String),
    #[error("unable to build request: {0}")]
    Build(#[from] reqwest::Error),
}

/// Build the request for `test`.
///
/// URL is hostname + endpoint with query parameters URL-encoded onto it.
/// The body is `request.json` when present, the raw `request.body`
/// otherwise. Cookies are joined into a single `Cookie` header.
///
/// # Errors
///
/// Returns error if the method, URL or a header is invalid.
pub fn build_request(client: &Client, test: &ApiTest) -> Result<Request, RequestError> {
    let method = reqwest::Method::from_bytes(test.method.as_bytes())
        .map_err(|_| RequestError::Method(test.method.clone()))?;
    let url = format!("{}{}", test.hostname, test.endpoint);
    let def = &test.request;

    let mut req = client.request(method, &url);
    if !def.query_params.is_empty() {
        req = req.query(&def.query_params);
    }

    // User headers first so `.json()` keeps an explicit Content-Type.
    for (k, v) in &def.headers {
        req = req.header(k, v);
    }

    if !def.cookies.is_empty() {
        let cookie = def
            .cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        req = req.header(reqwest::header::COOKIE, cookie);
    }

    req = match &def.json {
        Some(json) => req.json(json),
        None if !def.body.is_empty() => req.body(def.body.clone()),
        None => req,
    };

    Ok(req.build()?)
}
