//! Shared HTTP plumbing for the supplier clients.

use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::{Client, Response, Url};

use crate::error::SupplierError;

/// Transport settings shared by both supplier clients.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Redirect hops followed manually after the Gautzsch login POST.
    pub max_login_redirects: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "preisvergleich/0.1 (supplier-comparison)".to_owned(),
            max_login_redirects: 5,
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &preisvergleich_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_login_redirects: config.max_login_redirects,
        }
    }
}

/// Builds a `reqwest::Client` that never follows redirects on its own.
///
/// Login flows need to see every `Set-Cookie` and `Location` header, so
/// redirects are always handled by the caller.
///
/// # Errors
///
/// Returns [`SupplierError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(settings: &ClientSettings) -> Result<Client, SupplierError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(settings.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(client)
}

/// Joins `path` onto a supplier base URL and appends `query` pairs.
///
/// The base may carry a path prefix (`https://shop.fega.de/scripts`); it is
/// kept, and trailing slashes are ignored.
///
/// # Errors
///
/// Returns [`SupplierError::InvalidBaseUrl`] if the result is not a valid URL.
pub(crate) fn endpoint_url(
    base_url: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, SupplierError> {
    let base = base_url.trim().trim_end_matches('/');
    let raw = format!("{base}/{}", path.trim_start_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| SupplierError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SupplierError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Turns a non-2xx response into [`SupplierError::UnexpectedStatus`].
pub(crate) fn ensure_success(response: Response) -> Result<Response, SupplierError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(SupplierError::UnexpectedStatus {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}

/// Resolves the `Location` header of a response against the request URL.
///
/// Returns `None` when there is no usable `Location`.
pub(crate) fn redirect_target(current: &Url, headers: &HeaderMap) -> Option<Url> {
    let location = headers.get(LOCATION)?.to_str().ok()?.trim();
    if location.is_empty() {
        return None;
    }
    current.join(location).ok()
}

/// `true` when the response declares a JSON body (`application/json`,
/// `application/problem+json`, ...).
pub(crate) fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
}
