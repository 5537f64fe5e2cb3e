use crate::credentials::Credentials;
use crate::suppliers::SupplierId;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Fega & Schmitt login; `None` when username or password is unset.
    pub fega: Option<Credentials>,
    /// Gautzsch login; `None` when URL, username or password is unset.
    pub gautzsch: Option<Credentials>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_login_redirects: usize,
    /// Upper bound for one full comparison (both suppliers, joint await).
    pub compare_deadline_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn credentials(&self, supplier: SupplierId) -> Option<&Credentials> {
        match supplier {
            SupplierId::Fega => self.fega.as_ref(),
            SupplierId::Gautzsch => self.gautzsch.as_ref(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials' own Debug impl redacts the password.
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("fega", &self.fega)
            .field("gautzsch", &self.gautzsch)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_login_redirects", &self.max_login_redirects)
            .field("compare_deadline_secs", &self.compare_deadline_secs)
            .finish()
    }
}
