use serde::{Deserialize, Serialize};

/// The supplier catalogs queried for every comparison.
///
/// Variant order is significant: it is the iteration order of a
/// [`crate::ComparisonResult`] and the tie-break when two suppliers quote the
/// same price (the first-listed supplier wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierId {
    /// Fega & Schmitt, cookie-auth PHP shop (supplier `A`).
    Fega,
    /// Gautzsch, ASP.NET portal with anti-forgery tokens (supplier `B`).
    Gautzsch,
}

impl SupplierId {
    /// All suppliers in their fixed, first-listed-first order.
    pub const ALL: [SupplierId; 2] = [SupplierId::Fega, SupplierId::Gautzsch];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SupplierId::Fega => "fega",
            SupplierId::Gautzsch => "gautzsch",
        }
    }

    /// Human-readable supplier name as shown to the field user.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SupplierId::Fega => "Fega & Schmitt",
            SupplierId::Gautzsch => "Gautzsch",
        }
    }
}

impl std::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
