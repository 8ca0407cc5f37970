//! Warranty coverage per part.

use super::{lenient, RecordKey, UNKNOWN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarrantyRow {
    #[serde(alias = "PART_NAME", default, deserialize_with = "lenient::opt_string")]
    pub part: Option<String>,
    #[serde(alias = "EXPIRES", default, deserialize_with = "lenient::opt_string")]
    pub expires: Option<String>,
    #[serde(alias = "COVERED", default, deserialize_with = "lenient::flag")]
    pub covered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub struct Warranty {
    pub key: RecordKey,
    pub part: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub expires: Option<NaiveDate>,
    /// Expiry as sent by the backend, `"Unknown"` when absent
    pub expires_label: String,
    pub covered: bool,
    /// `"Yes"` / `"No"`
    pub covered_label: String,
}

impl Warranty {
    pub fn from_row(index: usize, row: WarrantyRow) -> Self {
        let expires = row
            .expires
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok());

        Self {
            key: RecordKey::natural_or_position(row.part.as_deref(), index),
            part: row.part.unwrap_or_else(|| UNKNOWN.to_string()),
            expires,
            expires_label: row.expires.unwrap_or_else(|| UNKNOWN.to_string()),
            covered: row.covered,
            covered_label: if row.covered { "Yes" } else { "No" }.to_string(),
        }
    }

    /// Covered and not yet past its expiry date. Unknown expiry counts as active.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.covered && self.expires.is_none_or(|date| date >= today)
    }
}
