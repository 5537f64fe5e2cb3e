use preisvergleich_core::SupplierId;
use thiserror::Error;

/// Terminal outcomes of one supplier lookup.
///
/// "Not configured" and "not found" are deliberately absent: they are
/// regular results (`None`), not errors.
#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("authentication with {supplier} failed: {reason}")]
    AuthenticationFailed { supplier: SupplierId, reason: String },

    #[error("unexpected response shape from {supplier}: {reason}")]
    UnexpectedResponseShape { supplier: SupplierId, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("session issued by {actual} cannot be used for {expected}")]
    SessionMismatch {
        expected: SupplierId,
        actual: SupplierId,
    },
}

impl SupplierError {
    pub(crate) fn auth(supplier: SupplierId, reason: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            supplier,
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(supplier: SupplierId, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            supplier,
            reason: reason.into(),
        }
    }

    /// `true` for network failures and non-2xx responses.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}
