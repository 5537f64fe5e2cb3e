//! Cross-supplier comparison of normalized product records.
//!
//! Pure and synchronous: the engine never sees supplier errors, only
//! [`ProductRecord`]s (possibly all-null).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductRecord;
use crate::suppliers::SupplierId;

/// Product name shown when no supplier delivered one.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unbekanntes Produkt";

/// The merged, decision-ready outcome of one EAN lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub ean: String,
    /// First supplier-provided name in supplier order, else [`UNKNOWN_PRODUCT_NAME`].
    pub product_name: String,
    pub manufacturer: Option<String>,
    /// One record per supplier; keys iterate in [`SupplierId`] order.
    pub per_supplier: BTreeMap<SupplierId, ProductRecord>,
    /// Supplier with the lowest price. Unset when no supplier has a price.
    pub cheapest: Option<SupplierId>,
    /// Price gap between the cheapest and the runner-up. Unset unless at
    /// least two suppliers are priced.
    pub savings: Option<Decimal>,
}

impl ComparisonResult {
    #[must_use]
    pub fn record(&self, supplier: SupplierId) -> Option<&ProductRecord> {
        self.per_supplier.get(&supplier)
    }

    /// Supplier to preselect for the order list.
    ///
    /// The cheapest supplier when one is known; otherwise the first supplier
    /// reporting availability; otherwise the first-listed supplier.
    #[must_use]
    pub fn default_selection(&self) -> SupplierId {
        if let Some(cheapest) = self.cheapest {
            return cheapest;
        }
        self.per_supplier
            .iter()
            .find(|(_, record)| record.available)
            .map_or(SupplierId::ALL[0], |(id, _)| *id)
    }
}

/// Builds the [`ComparisonResult`] for `ean` from one record per supplier.
///
/// `cheapest` is the supplier with the strictly lowest valid price, scanning
/// in [`SupplierId`] order so that exact ties keep the first-listed supplier.
/// If a supplier appears twice, the later record replaces the earlier one.
#[must_use]
pub fn compare_records(
    ean: &str,
    records: impl IntoIterator<Item = (SupplierId, ProductRecord)>,
) -> ComparisonResult {
    let per_supplier: BTreeMap<SupplierId, ProductRecord> = records.into_iter().collect();

    let mut priced: Vec<(SupplierId, Decimal)> = per_supplier
        .iter()
        .filter_map(|(id, record)| record.valid_price().map(|p| (*id, p)))
        .collect();
    // Stable sort keeps supplier order among equal prices.
    priced.sort_by(|a, b| a.1.cmp(&b.1));

    let cheapest = priced.first().map(|(id, _)| *id);
    let savings = match priced.as_slice() {
        [(_, lowest), (_, runner_up), ..] => Some((*runner_up - *lowest).abs()),
        _ => None,
    };

    let product_name = per_supplier
        .values()
        .find_map(|r| r.product_name.clone())
        .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_owned());
    let manufacturer = per_supplier.values().find_map(|r| r.manufacturer.clone());

    ComparisonResult {
        ean: ean.to_owned(),
        product_name,
        manufacturer,
        per_supplier,
        cheapest,
        savings,
    }
}

#[cfg(test)]
#[path = "comparison_test.rs"]
mod tests;
