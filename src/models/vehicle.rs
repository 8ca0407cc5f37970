//! Registered vehicles.

use super::{lenient, RecordKey, NOT_AVAILABLE, UNKNOWN};
use crate::navigation::NavigationIntent;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Icon key used when the make is missing or not recognized.
pub const GENERIC_ICON: &str = "generic";

/// Vehicle row as returned by `GET /api/vehicles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "CAR_YEAR", default, deserialize_with = "lenient::opt_i32")]
    pub year: Option<i32>,
    #[serde(rename = "MAKE", default, deserialize_with = "lenient::opt_string")]
    pub make: Option<String>,
    #[serde(rename = "MODEL", default, deserialize_with = "lenient::opt_string")]
    pub model: Option<String>,
    #[serde(rename = "VIN_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub vin: Option<String>,
    #[serde(rename = "CAR_COLOR", default, deserialize_with = "lenient::opt_string")]
    pub color: Option<String>,
    #[serde(rename = "LIC_NUMBER", default, deserialize_with = "lenient::opt_string")]
    pub license_plate: Option<String>,
}

/// Vehicle card shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub struct Vehicle {
    pub key: RecordKey,
    pub year: Option<i32>,
    /// Year for display, `"N/A"` when unknown
    pub year_label: String,
    pub make: String,
    pub model: String,
    pub vin: Option<String>,
    pub color: String,
    pub license_plate: String,
    /// Brand icon key, [`GENERIC_ICON`] for unknown makes
    pub icon: String,
}

impl Vehicle {
    pub fn from_record(index: usize, record: VehicleRecord) -> Self {
        let key = RecordKey::natural_or_position(record.vin.as_deref(), index);

        Self {
            key,
            year: record.year,
            year_label: year_label(record.year),
            icon: icon_key(record.make.as_deref()).to_string(),
            make: record.make.unwrap_or_else(|| UNKNOWN.to_string()),
            model: record.model.unwrap_or_else(|| UNKNOWN.to_string()),
            vin: record.vin,
            color: record.color.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            license_plate: record
                .license_plate
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// "2021 Tesla Model S"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year_label, self.make, self.model)
    }

    /// Intent to open this vehicle's service history, if it has a VIN.
    pub fn detail_intent(&self) -> Option<NavigationIntent> {
        self.vin
            .as_ref()
            .map(|vin| NavigationIntent::VehicleDetail { vin: vin.clone() })
    }
}

pub(crate) fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Map a make to its icon key.
pub fn icon_key(make: Option<&str>) -> &'static str {
    let Some(make) = make else {
        return GENERIC_ICON;
    };

    let normalized: String = make
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match normalized.as_str() {
        "tesla" => "tesla",
        "toyota" => "toyota",
        "ford" => "ford",
        "chevrolet" | "chevy" => "chevrolet",
        "honda" => "honda",
        "nissan" => "nissan",
        "bmw" => "bmw",
        "mercedes" | "mercedesbenz" => "mercedes",
        "audi" => "audi",
        "volkswagen" | "vw" => "volkswagen",
        "hyundai" => "hyundai",
        "kia" => "kia",
        "subaru" => "subaru",
        "mazda" => "mazda",
        "jeep" => "jeep",
        "dodge" => "dodge",
        "ram" => "ram",
        "gmc" => "gmc",
        "lexus" => "lexus",
        "volvo" => "volvo",
        _ => GENERIC_ICON,
    }
}
