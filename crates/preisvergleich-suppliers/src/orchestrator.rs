//! Runs both supplier lookups concurrently and folds them into one
//! [`ComparisonResult`].

use preisvergleich_core::{
    compare_records, AppConfig, ComparisonResult, Credentials, ProductRecord,
};

use crate::adapter::{fetch_record, SupplierAdapter};
use crate::error::SupplierError;
use crate::fega::FegaClient;
use crate::gautzsch::GautzschClient;
use crate::http::ClientSettings;

/// Owns one client per supplier. Holds no sessions between comparisons.
pub struct Orchestrator {
    fega: FegaClient,
    gautzsch: GautzschClient,
}

impl Orchestrator {
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if an HTTP client cannot be built.
    pub fn new(settings: &ClientSettings) -> Result<Self, SupplierError> {
        Ok(Self {
            fega: FegaClient::new(settings)?,
            gautzsch: GautzschClient::new(settings)?,
        })
    }

    /// Looks `ean` up at both suppliers and compares the results.
    ///
    /// Never fails: an unconfigured supplier, a miss, or any supplier error
    /// yields that supplier's empty record.
    pub async fn compare(
        &self,
        ean: &str,
        fega_credentials: Option<&Credentials>,
        gautzsch_credentials: Option<&Credentials>,
    ) -> ComparisonResult {
        let (fega, gautzsch) = tokio::join!(
            lookup(&self.fega, fega_credentials, ean),
            lookup(&self.gautzsch, gautzsch_credentials, ean),
        );

        let result = compare_records(
            ean,
            [
                (self.fega.supplier(), fega),
                (self.gautzsch.supplier(), gautzsch),
            ],
        );
        tracing::info!(
            ean,
            cheapest = ?result.cheapest,
            savings = ?result.savings,
            "comparison complete"
        );
        result
    }

    /// [`Orchestrator::compare`] with the credentials from `config`.
    pub async fn compare_with_config(&self, ean: &str, config: &AppConfig) -> ComparisonResult {
        self.compare(ean, config.fega.as_ref(), config.gautzsch.as_ref())
            .await
    }
}

async fn lookup<A: SupplierAdapter>(
    adapter: &A,
    credentials: Option<&Credentials>,
    ean: &str,
) -> ProductRecord {
    let supplier = adapter.supplier();
    let Some(credentials) = credentials.filter(|c| c.is_configured()) else {
        tracing::debug!(supplier = %supplier, "supplier not configured; skipping");
        return ProductRecord::empty();
    };

    match fetch_record(adapter, credentials, ean).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::debug!(supplier = %supplier, ean, "no matching article");
            ProductRecord::empty()
        }
        Err(e) => {
            tracing::warn!(
                supplier = %supplier,
                ean,
                transport = e.is_transport(),
                error = %e,
                "supplier lookup failed"
            );
            ProductRecord::empty()
        }
    }
}
