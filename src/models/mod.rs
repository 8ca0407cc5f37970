// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Backend rows and the view records screens render.

pub mod auth;
pub mod lenient;
pub mod profile;
pub mod service_record;
pub mod vehicle;
pub mod warranty;
pub mod work_order;

pub use auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use profile::ProfileView;
pub use service_record::{ServiceRecord, ServiceRecordRow};
pub use vehicle::{Vehicle, VehicleRecord};
pub use warranty::{Warranty, WarrantyRow};
pub use work_order::{EstimateRow, WorkOrder};

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub(crate) const NOT_AVAILABLE: &str = "N/A";
pub(crate) const UNKNOWN: &str = "Unknown";

/// List identity of a view record: the natural key (VIN, invoice number...)
/// when the backend sent one, otherwise the row position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub enum RecordKey {
    Natural(String),
    Position(usize),
}

impl RecordKey {
    pub fn natural_or_position(natural: Option<&str>, index: usize) -> Self {
        match natural {
            Some(key) => RecordKey::Natural(key.to_string()),
            None => RecordKey::Position(index),
        }
    }
}
