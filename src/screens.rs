// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Declarative screen descriptions.
//!
//! Each screen is a [`ScreenResource`]: where to fetch, which top-level field
//! holds the list, how a backend row becomes a view record, and what to show
//! when the list is empty. [`ScreenController`](crate::controller::ScreenController)
//! runs the same lifecycle for all of them.

use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::{
    EstimateRow, ServiceRecord, ServiceRecordRow, Vehicle, VehicleRecord, Warranty, WarrantyRow,
    WorkOrder,
};
use crate::services::api::paths;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub trait ScreenResource: Send + Sync + 'static {
    /// Row shape as the backend sends it
    type Row: DeserializeOwned;
    /// Record handed to the UI
    type View: Clone + Send + Sync + 'static;

    /// Top-level response field holding the list.
    const LIST_FIELD: &'static str;
    const EMPTY_MESSAGE: &'static str;
    /// Whether the request needs the customer id from the token.
    const REQUIRES_IDENTITY: bool = false;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Request path. `claims` is only decoded for screens that require
    /// identity; `None` there means the request cannot be built.
    fn path(&self, claims: Option<&Claims>) -> Option<String>;

    /// Extra envelope checks beyond the list field being present.
    fn check_envelope(&self, _payload: &Value) -> Result<(), ApiError> {
        Ok(())
    }

    fn map(index: usize, row: Self::Row) -> Self::View;
}

/// Turn a checked payload into view records.
///
/// A null list renders as empty; anything else that is not an array of
/// objects is a malformed response.
pub fn map_list<R: ScreenResource>(payload: &Value) -> Result<Vec<R::View>, ApiError> {
    let items = match payload.get(R::LIST_FIELD) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) => return Ok(Vec::new()),
        Some(_) | None => {
            return Err(ApiError::MalformedResponse(format!(
                "`{}` is not a list",
                R::LIST_FIELD
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row: R::Row = serde_json::from_value(item.clone()).map_err(|e| {
                ApiError::MalformedResponse(format!("{}[{}]: {}", R::LIST_FIELD, index, e))
            })?;
            Ok(R::map(index, row))
        })
        .collect()
}

/// Dashboard: the customer's vehicles.
#[derive(Debug, Clone, Default)]
pub struct VehiclesScreen;

impl ScreenResource for VehiclesScreen {
    type Row = VehicleRecord;
    type View = Vehicle;

    const LIST_FIELD: &'static str = "cars";
    const EMPTY_MESSAGE: &'static str = "No vehicles registered yet.";

    fn name(&self) -> &'static str {
        "vehicles"
    }

    fn path(&self, _claims: Option<&Claims>) -> Option<String> {
        Some(paths::VEHICLES.to_string())
    }

    fn map(index: usize, row: VehicleRecord) -> Vehicle {
        Vehicle::from_record(index, row)
    }
}

/// Service history for one VIN.
#[derive(Debug, Clone)]
pub struct VehicleHistoryScreen {
    pub vin: String,
}

impl ScreenResource for VehicleHistoryScreen {
    type Row = ServiceRecordRow;
    type View = ServiceRecord;

    const LIST_FIELD: &'static str = "history";
    const EMPTY_MESSAGE: &'static str = "No history found for this vehicle.";

    fn name(&self) -> &'static str {
        "vehicle_history"
    }

    fn path(&self, _claims: Option<&Claims>) -> Option<String> {
        Some(format!(
            "{}?vin={}",
            paths::VEHICLE_HISTORY,
            urlencoding::encode(self.vin.trim())
        ))
    }

    fn map(index: usize, row: ServiceRecordRow) -> ServiceRecord {
        ServiceRecord::from_row(index, row)
    }
}

/// Active estimates for the logged-in customer.
#[derive(Debug, Clone, Default)]
pub struct WorkOrdersScreen;

impl ScreenResource for WorkOrdersScreen {
    type Row = EstimateRow;
    type View = WorkOrder;

    const LIST_FIELD: &'static str = "data";
    const EMPTY_MESSAGE: &'static str = "No active estimates.";
    const REQUIRES_IDENTITY: bool = true;

    fn name(&self) -> &'static str {
        "work_orders"
    }

    fn path(&self, claims: Option<&Claims>) -> Option<String> {
        claims.map(|c| {
            format!(
                "{}?customerId={}",
                paths::ESTIMATES,
                urlencoding::encode(&c.customer_id)
            )
        })
    }

    /// The estimates endpoint wraps its list in `{success, data}`.
    fn check_envelope(&self, payload: &Value) -> Result<(), ApiError> {
        match payload.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            _ => Err(ApiError::MalformedResponse(
                "estimates response not marked successful".to_string(),
            )),
        }
    }

    fn map(index: usize, row: EstimateRow) -> WorkOrder {
        WorkOrder::from_row(index, row)
    }
}

/// Warranty coverage for one VIN.
#[derive(Debug, Clone)]
pub struct WarrantyScreen {
    pub vin: String,
}

impl ScreenResource for WarrantyScreen {
    type Row = WarrantyRow;
    type View = Warranty;

    const LIST_FIELD: &'static str = "warranties";
    const EMPTY_MESSAGE: &'static str = "No warranty information on file.";

    fn name(&self) -> &'static str {
        "warranty"
    }

    fn path(&self, _claims: Option<&Claims>) -> Option<String> {
        Some(format!(
            "{}?vin={}",
            paths::WARRANTIES,
            urlencoding::encode(self.vin.trim())
        ))
    }

    fn map(index: usize, row: WarrantyRow) -> Warranty {
        Warranty::from_row(index, row)
    }
}
