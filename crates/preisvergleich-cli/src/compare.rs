//! `compare` command: one bounded comparison, printed as JSON or text.

use std::fmt::Write as _;
use std::time::Duration;

use preisvergleich_core::{AppConfig, ComparisonResult, ProductRecord, SupplierId};
use preisvergleich_suppliers::{ClientSettings, Orchestrator};
use rust_decimal::Decimal;

use crate::OutputFormat;

/// Runs the comparison under the configured deadline and prints it.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built, if the comparison
/// misses its deadline, or if JSON serialization fails.
pub(crate) async fn run_compare(
    config: &AppConfig,
    ean: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(&ClientSettings::from_app_config(config))?;
    for supplier in SupplierId::ALL {
        if config.credentials(supplier).is_none() {
            tracing::info!(
                supplier = %supplier,
                "supplier not configured; its column stays empty"
            );
        }
    }

    let deadline = Duration::from_secs(config.compare_deadline_secs);
    let result = tokio::time::timeout(deadline, orchestrator.compare_with_config(ean, config))
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "comparison for {ean} did not finish within {}s",
                config.compare_deadline_secs
            )
        })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print!("{}", render_text(&result)),
    }
    Ok(())
}

/// Human-readable summary, one line per supplier; `*` marks the cheapest.
pub(crate) fn render_text(result: &ComparisonResult) -> String {
    let mut out = String::new();

    let _ = write!(out, "EAN {}: {}", result.ean, result.product_name);
    if let Some(manufacturer) = &result.manufacturer {
        let _ = write!(out, " ({manufacturer})");
    }
    out.push('\n');

    for (supplier, record) in &result.per_supplier {
        let marker = if result.cheapest == Some(*supplier) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {:<16}{:>16}  {}",
            supplier.display_name(),
            price_cell(record),
            availability_cell(record),
        );
    }

    if let Some(savings) = result.savings {
        let _ = writeln!(out, "Ersparnis: {}", format_price(savings));
    }
    out
}

fn price_cell(record: &ProductRecord) -> String {
    let Some(price) = record.valid_price() else {
        return "Nicht verfügbar".to_owned();
    };
    let mut cell = format_price(price);
    if record.price_unit != 1 {
        let _ = write!(cell, " / {}", record.price_unit);
        if let Some(label) = &record.price_unit_label {
            let _ = write!(cell, " {label}");
        }
    }
    cell
}

fn availability_cell(record: &ProductRecord) -> &'static str {
    if record.available {
        "lieferbar"
    } else {
        "nicht lieferbar"
    }
}

fn format_price(price: Decimal) -> String {
    format!("{price:.2} €")
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
