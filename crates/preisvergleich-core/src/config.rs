use url::Url;

use crate::app_config::AppConfig;
use crate::credentials::Credentials;
use crate::ConfigError;

/// Shop root used for Fega & Schmitt when `PV_FEGA_URL` is not set.
pub const DEFAULT_FEGA_URL: &str = "https://shop.fega.de/scripts";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric or URL value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric or URL value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let credentials = |prefix: &str,
                       default_url: Option<&str>|
     -> Result<Option<Credentials>, ConfigError> {
        let url_var = format!("{prefix}_URL");
        let url = optional(&url_var).or_else(|| default_url.map(str::to_string));
        let username = optional(&format!("{prefix}_USERNAME"));
        let password = optional(&format!("{prefix}_PASSWORD"));

        let (Some(url), Some(username), Some(password)) = (url, username, password) else {
            return Ok(None);
        };
        validate_base_url(&url_var, &url)?;
        Ok(Some(Credentials::new(url, username, password)))
    };

    let fega = credentials("PV_FEGA", Some(DEFAULT_FEGA_URL))?;
    let gautzsch = credentials("PV_GAUTZSCH", None)?;

    let log_level = or_default("PV_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PV_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PV_USER_AGENT", "preisvergleich/0.1 (supplier-comparison)");
    let max_login_redirects = parse_usize("PV_MAX_LOGIN_REDIRECTS", "5")?;
    let compare_deadline_secs = parse_u64("PV_COMPARE_DEADLINE_SECS", "45")?;

    Ok(AppConfig {
        log_level,
        fega,
        gautzsch,
        request_timeout_secs,
        user_agent,
        max_login_redirects,
        compare_deadline_secs,
    })
}

/// Rejects supplier URLs that cannot be used as an HTTP(S) base.
fn validate_base_url(var: &str, raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: format!("\"{raw}\" is not a usable base URL: {reason}"),
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if !url.has_host() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
