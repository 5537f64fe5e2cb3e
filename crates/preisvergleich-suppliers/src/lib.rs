//! Supplier integrations for the price comparison: sessions, the two shop
//! clients, response normalization, and the concurrent orchestrator.

pub mod adapter;
pub mod error;
pub mod fega;
pub mod gautzsch;
mod html;
pub mod http;
pub mod normalize;
pub mod orchestrator;
pub mod session;

pub use adapter::{fetch_record, SupplierAdapter};
pub use error::SupplierError;
pub use fega::{FegaClient, FegaRawItem};
pub use gautzsch::{GautzschArticle, GautzschClient};
pub use http::ClientSettings;
pub use normalize::{normalize_fega, normalize_gautzsch};
pub use orchestrator::Orchestrator;
pub use session::{Cookie, Session};
