//! Service history invoices for one vehicle.

use super::{lenient, RecordKey, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shown in place of an empty category list.
pub const NO_SERVICE_CATEGORIES: &str = "No service categories";

/// Invoice row as returned by `GET /api/vehicles/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRecordRow {
    #[serde(rename = "INVOICE_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub invoice_number: Option<String>,
    #[serde(rename = "TOTAL_SALE_AMOUNT", default, deserialize_with = "lenient::opt_string")]
    pub total_sale_amount: Option<String>,
    #[serde(rename = "VIN_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub vin: Option<String>,
    #[serde(rename = "SERVICE_CATEGORIES", default, deserialize_with = "lenient::string_list")]
    pub service_categories: Vec<String>,
}

/// One invoice card in the service history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub struct ServiceRecord {
    pub key: RecordKey,
    pub invoice_number: String,
    /// Formatted total, e.g. `"$120.00"`
    pub amount: String,
    pub vin: String,
    pub service_categories: Vec<String>,
}

impl ServiceRecord {
    pub fn from_row(index: usize, row: ServiceRecordRow) -> Self {
        Self {
            key: RecordKey::natural_or_position(row.invoice_number.as_deref(), index),
            invoice_number: row
                .invoice_number
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            amount: lenient::format_amount(row.total_sale_amount.as_deref()),
            vin: row.vin.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            service_categories: row.service_categories,
        }
    }

    /// Category lines for the expanded card.
    pub fn category_lines(&self) -> Vec<String> {
        if self.service_categories.is_empty() {
            return vec![NO_SERVICE_CATEGORIES.to_string()];
        }
        self.service_categories.clone()
    }
}
