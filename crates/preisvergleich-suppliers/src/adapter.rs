//! The capability set every supplier integration provides.

use std::future::Future;

use preisvergleich_core::{Credentials, ProductRecord, SupplierId};

use crate::error::SupplierError;
use crate::session::Session;

/// One supplier's wire protocol: login, EAN search, and normalization of the
/// supplier-native search hit.
///
/// Implementors own no per-request state; every call to
/// [`SupplierAdapter::authenticate`] produces a fresh [`Session`] that is only
/// accepted by the same adapter's [`SupplierAdapter::search`].
pub trait SupplierAdapter: Sync {
    /// Supplier-native search hit, consumed immediately by `normalize`.
    type Raw: Send;

    fn supplier(&self) -> SupplierId;

    /// Logs in and returns the authenticated session.
    ///
    /// No retries: a failed login is reported as-is.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, SupplierError>> + Send;

    /// Looks up `ean`. `Ok(None)` means the supplier has no matching article.
    fn search(
        &self,
        session: &Session,
        ean: &str,
    ) -> impl Future<Output = Result<Option<Self::Raw>, SupplierError>> + Send;

    /// Maps a raw hit to a [`ProductRecord`]. `None` discards an unusable hit,
    /// which callers treat like "not found".
    fn normalize(&self, raw: Self::Raw, ean: &str) -> Option<ProductRecord>;
}

/// Runs login, search and normalization for one supplier without
/// downgrading errors.
///
/// # Errors
///
/// Propagates any [`SupplierError`] from authentication or search.
pub async fn fetch_record<A: SupplierAdapter>(
    adapter: &A,
    credentials: &Credentials,
    ean: &str,
) -> Result<Option<ProductRecord>, SupplierError> {
    let session = adapter.authenticate(credentials).await?;
    tracing::debug!(
        supplier = %adapter.supplier(),
        cookies = session.cookies().len(),
        "session established"
    );
    let raw = adapter.search(&session, ean).await?;
    Ok(raw.and_then(|raw| adapter.normalize(raw, ean)))
}
