//! Plain-text build report
//!
//! One line per filled slot, `name - discount / common (url)`, followed by
//! the discount and full price sums.

use crate::builder::{BuildSelection, BuildTotals};
use crate::model::Product;
use crate::CatalogError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

const TOTAL_LABEL: &str = "Samtals";
const FULL_PRICE_LABEL: &str = "Fullt verð";

/// Writes the report for `selection` to `output_path`
///
/// # Arguments
///
/// * `selection` - The build; every filled slot must be loaded in full
/// * `output_path` - Path where the report should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(CatalogError::Validation)` - A filled slot is still a summary
/// * `Err(CatalogError::Io)` - Failed to write the file
pub fn write_report(selection: &BuildSelection, output_path: &Path) -> Result<(), CatalogError> {
    let report = format_report(selection)?;

    let mut file = File::create(output_path)?;
    file.write_all(report.as_bytes())?;

    info!("Wrote build report to {}", output_path.display());
    Ok(())
}

/// Formats the report for `selection`
pub fn format_report(selection: &BuildSelection) -> Result<String, CatalogError> {
    let totals = selection.totals()?;
    let products: Vec<&Product> = selection.filled().map(|(_, p)| p.product().as_ref()).collect();
    Ok(render(&products, totals))
}

fn render(products: &[&Product], totals: BuildTotals) -> String {
    let mut out = String::new();

    for product in products {
        let common = product.details().map(|d| d.common_price).unwrap_or_default();
        out.push_str(&format!(
            "{} - {} / {} ({})\n",
            product.name(),
            product.discount_price(),
            common,
            product.url()
        ));
    }

    out.push('\n');
    out.push_str(&format!("{}: {}\n", TOTAL_LABEL, totals.discount));
    out.push_str(&format!("{}: {}\n", FULL_PRICE_LABEL, totals.common));
    out
}
