//! Active estimates (work orders).

use super::{lenient, vehicle::year_label, RecordKey, NOT_AVAILABLE, UNKNOWN};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Estimate row as returned by `GET /api/estimates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRow {
    #[serde(rename = "ESTIMATE_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub estimate_number: Option<String>,
    #[serde(rename = "STATUS", default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(rename = "CAR_YEAR", default, deserialize_with = "lenient::opt_i32")]
    pub year: Option<i32>,
    #[serde(rename = "MAKE", default, deserialize_with = "lenient::opt_string")]
    pub make: Option<String>,
    #[serde(rename = "MODEL", default, deserialize_with = "lenient::opt_string")]
    pub model: Option<String>,
    #[serde(rename = "LIC_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub license_plate: Option<String>,
    #[serde(rename = "TOTAL", default, deserialize_with = "lenient::opt_string")]
    pub total: Option<String>,
    #[serde(rename = "VIN_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub vin: Option<String>,
    #[serde(rename = "SERVICE_CATEGORIES", default, deserialize_with = "lenient::string_list")]
    pub service_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub struct WorkOrder {
    pub key: RecordKey,
    pub estimate_number: String,
    pub status: String,
    /// "2021 Tesla Model S"
    pub vehicle: String,
    pub license_plate: String,
    /// Formatted total, if the backend sent one
    pub total: Option<String>,
    pub vin: Option<String>,
    pub service_categories: Vec<String>,
}

impl WorkOrder {
    pub fn from_row(index: usize, row: EstimateRow) -> Self {
        let vehicle = format!(
            "{} {} {}",
            year_label(row.year),
            row.make.as_deref().unwrap_or(UNKNOWN),
            row.model.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string();

        Self {
            key: RecordKey::natural_or_position(row.estimate_number.as_deref(), index),
            estimate_number: row
                .estimate_number
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: row.status.unwrap_or_else(|| UNKNOWN.to_string()),
            vehicle,
            license_plate: row
                .license_plate
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            total: row
                .total
                .as_deref()
                .map(|t| lenient::format_amount(Some(t))),
            vin: row.vin,
            service_categories: row.service_categories,
        }
    }
}
