//! Gautzsch: ASP.NET portal with anti-forgery login and a JSON article search.

mod token;
pub mod types;

use preisvergleich_core::{Credentials, ProductRecord, SupplierId};
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::adapter::SupplierAdapter;
use crate::error::SupplierError;
use crate::http::{
    build_client, endpoint_url, ensure_success, is_json_content_type, redirect_target,
    ClientSettings,
};
use crate::normalize::normalize_gautzsch;
use crate::session::Session;

use self::token::{extract_antiforgery_token, TOKEN_FIELD};
pub use self::types::GautzschArticle;

const LOGIN_PATH: &str = "Login";
const SEARCH_PATH: &str = "ProductList/OxomiArticleSearch";

/// Client for the Gautzsch customer portal.
pub struct GautzschClient {
    client: Client,
    max_login_redirects: usize,
}

impl GautzschClient {
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, SupplierError> {
        Ok(Self {
            client: build_client(settings)?,
            max_login_redirects: settings.max_login_redirects,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, SupplierError> {
        let login_url = endpoint_url(credentials.base(), LOGIN_PATH, &[])?;

        let response = self.client.get(login_url.clone()).send().await?;
        let response = ensure_success(response)?;
        let session =
            Session::from_headers(SupplierId::Gautzsch, credentials.base(), response.headers());
        let page = response.text().await?;
        let token = extract_antiforgery_token(&page).ok_or_else(|| {
            SupplierError::auth(
                SupplierId::Gautzsch,
                "login page did not contain an anti-forgery token",
            )
        })?;
        tracing::debug!(
            supplier = %SupplierId::Gautzsch,
            cookies = session.cookies().len(),
            "login page fetched"
        );

        let form = [
            ("Username", credentials.username.as_str()),
            ("Password", credentials.password.as_str()),
            ("RememberMe", "false"),
            (TOKEN_FIELD, token.as_str()),
        ];
        let response = self
            .client
            .post(login_url.clone())
            .header(COOKIE, session.cookie_header())
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(SupplierError::UnexpectedStatus {
                status: status.as_u16(),
                url: login_url.to_string(),
            });
        }
        let session = session.merge_headers(response.headers());

        // A successful login always redirects; the form is re-rendered on failure.
        let Some(next) = redirect_target(&login_url, response.headers()) else {
            return Err(SupplierError::auth(
                SupplierId::Gautzsch,
                format!("credentials rejected (status {})", status.as_u16()),
            ));
        };

        let session = self.follow_redirects(session, next).await?;
        if session.is_empty() {
            return Err(SupplierError::auth(
                SupplierId::Gautzsch,
                "login did not set any session cookie",
            ));
        }
        Ok(session)
    }

    /// Walks the post-login redirect chain, collecting cookies from each hop.
    async fn follow_redirects(
        &self,
        mut session: Session,
        first: Url,
    ) -> Result<Session, SupplierError> {
        let mut current = first;

        for hop in 1..=self.max_login_redirects {
            let response = self
                .client
                .get(current.clone())
                .header(COOKIE, session.cookie_header())
                .send()
                .await?;
            let status = response.status();
            session = session.merge_headers(response.headers());
            tracing::debug!(
                supplier = %SupplierId::Gautzsch,
                hop,
                status = status.as_u16(),
                url = %current,
                "login redirect followed"
            );

            let next = status
                .is_redirection()
                .then(|| redirect_target(&current, response.headers()))
                .flatten();
            match next {
                Some(next) => current = next,
                None => return Ok(session),
            }
        }

        tracing::debug!(
            supplier = %SupplierId::Gautzsch,
            limit = self.max_login_redirects,
            pending = %current,
            "login redirect limit reached; continuing with collected cookies"
        );
        Ok(session)
    }
}

impl SupplierAdapter for GautzschClient {
    type Raw = GautzschArticle;

    fn supplier(&self) -> SupplierId {
        SupplierId::Gautzsch
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, SupplierError> {
        self.login(credentials).await
    }

    async fn search(
        &self,
        session: &Session,
        ean: &str,
    ) -> Result<Option<GautzschArticle>, SupplierError> {
        session.ensure_supplier(SupplierId::Gautzsch)?;
        let url = endpoint_url(session.base_url(), SEARCH_PATH, &[("searchTerm", ean)])?;

        let response = self
            .client
            .get(url)
            .header(COOKIE, session.cookie_header())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success(response)?;

        if !is_json_content_type(response.headers()) {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<none>")
                .to_owned();
            return Err(SupplierError::shape(
                SupplierId::Gautzsch,
                format!("expected JSON from article search, got content type {content_type}"),
            ));
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|source| SupplierError::Deserialize {
                context: "gautzsch article search".to_owned(),
                source,
            })?;
        let Value::Array(items) = value else {
            return Err(SupplierError::shape(
                SupplierId::Gautzsch,
                "article search response is not a JSON array",
            ));
        };
        tracing::debug!(
            supplier = %SupplierId::Gautzsch,
            ean,
            records = items.len(),
            "gautzsch search response parsed"
        );

        let Some(first) = items.into_iter().next() else {
            return Ok(None);
        };
        let article =
            serde_json::from_value(first).map_err(|source| SupplierError::Deserialize {
                context: "gautzsch article".to_owned(),
                source,
            })?;
        Ok(Some(article))
    }

    fn normalize(&self, raw: GautzschArticle, _ean: &str) -> Option<ProductRecord> {
        normalize_gautzsch(&raw)
    }
}
