//! Fega & Schmitt: cookie-auth PHP shop.
//!
//! Login is a single form POST whose `Set-Cookie` headers make up the whole
//! session. Search results are HTML with one `data-addtobasket` attribute per
//! matched article (see [`parse`]).

pub mod parse;

use preisvergleich_core::{Credentials, ProductRecord, SupplierId};
use reqwest::header::COOKIE;
use reqwest::Client;

use crate::adapter::SupplierAdapter;
use crate::error::SupplierError;
use crate::http::{build_client, endpoint_url, ensure_success, ClientSettings};
use crate::normalize::normalize_fega;
use crate::session::Session;

pub use parse::BasketRecord;

const LOGIN_PATH: &str = "clsAIShop.php";
const SEARCH_PATH: &str = "shop.php";

/// First search hit plus the page it came from.
///
/// The page is kept because the product name is not part of the basket
/// record and has to be scraped from the surrounding markup.
#[derive(Debug, Clone)]
pub struct FegaRawItem {
    pub record: BasketRecord,
    pub html: String,
}

/// Client for the Fega & Schmitt shop.
pub struct FegaClient {
    client: Client,
}

impl FegaClient {
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, SupplierError> {
        Ok(Self {
            client: build_client(settings)?,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, SupplierError> {
        let url = endpoint_url(credentials.base(), LOGIN_PATH, &[("cmd", "MemberLogin")])?;
        let form = [
            ("memb_login", credentials.username.as_str()),
            ("memb_pass", credentials.password.as_str()),
        ];

        let response = self.client.post(url.clone()).form(&form).send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(SupplierError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let session =
            Session::from_headers(SupplierId::Fega, credentials.base(), response.headers());
        if session.is_empty() {
            return Err(SupplierError::auth(
                SupplierId::Fega,
                "login response did not set a session cookie",
            ));
        }

        tracing::debug!(
            supplier = %SupplierId::Fega,
            status = status.as_u16(),
            cookies = session.cookies().len(),
            "fega login accepted"
        );
        Ok(session)
    }

    async fn fetch_search_page(
        &self,
        session: &Session,
        ean: &str,
    ) -> Result<String, SupplierError> {
        let url = endpoint_url(
            session.base_url(),
            SEARCH_PATH,
            &[("cmd", "Suche"), ("q", ean)],
        )?;
        let response = self
            .client
            .get(url)
            .header(COOKIE, session.cookie_header())
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(response.text().await?)
    }
}

impl SupplierAdapter for FegaClient {
    type Raw = FegaRawItem;

    fn supplier(&self) -> SupplierId {
        SupplierId::Fega
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, SupplierError> {
        self.login(credentials).await
    }

    async fn search(
        &self,
        session: &Session,
        ean: &str,
    ) -> Result<Option<FegaRawItem>, SupplierError> {
        session.ensure_supplier(SupplierId::Fega)?;
        let html = self.fetch_search_page(session, ean).await?;

        let records = parse::extract_basket_records(&html);
        tracing::debug!(
            supplier = %SupplierId::Fega,
            ean,
            records = records.len(),
            "fega search page parsed"
        );

        // An EAN search is expected to be unambiguous; the first hit is authoritative.
        let Some(record) = records.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(FegaRawItem { record, html }))
    }

    fn normalize(&self, raw: FegaRawItem, ean: &str) -> Option<ProductRecord> {
        Some(normalize_fega(&raw, ean))
    }
}
