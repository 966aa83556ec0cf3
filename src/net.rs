// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared HTTP transport for the platform APIs.
//!
//! ```text
//! provider builds RequestBuilder (auth, body)
//!        |
//!        v
//!   fetch_json::<T>()
//!        |
//!   send --err--> NetworkError::Reqwest
//!        |
//!   status != 200 --> NetworkError::HttpError { status, url, body }
//!        |
//!   serde_json --err--> NetworkError::Decode
//!        v
//!        T
//!
//! Global client: OnceLock, connection pool, keep-alive, 30s timeout
//! ```
//!
//! No retries happen here; a failed request surfaces immediately.

use crate::error::{DashResult, NetworkError};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Request timeout applied to every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Global HTTP client - initialized once, reused by every provider.
/// Falls back to a basic client if custom configuration fails.
pub fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// `prdash/<version>`.
#[must_use]
pub fn user_agent() -> String {
    format!("prdash/{}", env!("CARGO_PKG_VERSION"))
}

/// Send `request` and return the raw body of a 200 response.
///
/// # Errors
///
/// Returns `NetworkError::Reqwest` on transport failure and
/// `NetworkError::HttpError` (carrying the response body) for any status other
/// than 200.
pub async fn fetch_text(request: RequestBuilder, url: &str) -> DashResult<String> {
    let response = request.send().await.map_err(NetworkError::Reqwest)?;
    let status = response.status();
    let body = response.text().await.map_err(NetworkError::Reqwest)?;
    debug!(url, status = status.as_u16(), bytes = body.len(), "api response");

    if status != StatusCode::OK {
        return Err(NetworkError::HttpError {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        }
        .into());
    }
    Ok(body)
}

/// Send `request` and decode a 200 JSON response into `T`.
///
/// # Errors
///
/// As [`fetch_text`], plus `NetworkError::Decode` when the body does not match `T`.
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder, url: &str) -> DashResult<T> {
    let body = fetch_text(request, url).await?;
    decode_json(&body, url)
}

/// Decode a JSON body, naming `url` in the error.
///
/// # Errors
///
/// Returns `NetworkError::Decode` when `body` does not match `T`.
pub fn decode_json<T: DeserializeOwned>(body: &str, url: &str) -> DashResult<T> {
    serde_json::from_str(body).map_err(|err| {
        NetworkError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
        .into()
    })
}

/// Join a base URL and a path, tolerating a trailing slash on the base.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
