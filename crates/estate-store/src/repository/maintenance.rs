//! # Maintenance Repository

use chrono::NaiveDate;
use estate_core::validation::validate_maintenance;
use estate_core::{MaintenancePriority, MaintenanceRequest, MaintenanceStatus, MaintenanceType};
use serde::Deserialize;
use tracing::{debug, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    pub assigned_to: String,
    pub cost: f64,
    #[serde(default)]
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub estimated_duration: Option<f64>,
    #[serde(default)]
    pub actual_duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_id: Option<Option<String>>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<MaintenanceType>,
    pub priority: Option<MaintenancePriority>,
    pub status: Option<MaintenanceStatus>,
    pub scheduled_date: Option<NaiveDate>,
    pub completed_date: Option<Option<NaiveDate>>,
    pub assigned_to: Option<String>,
    pub cost: Option<f64>,
    pub actual_cost: Option<Option<f64>>,
    pub estimated_duration: Option<Option<f64>>,
    pub actual_duration: Option<Option<f64>>,
}

impl EntityStore {
    pub fn add_maintenance_request(
        &mut self,
        new: NewMaintenanceRequest,
    ) -> StoreResult<MaintenanceRequest> {
        let request = MaintenanceRequest {
            id: Self::next_id(),
            title: new.title,
            description: new.description,
            property_id: new.property_id,
            maintenance_type: new.maintenance_type,
            priority: new.priority,
            status: new.status,
            scheduled_date: new.scheduled_date,
            completed_date: new.completed_date,
            assigned_to: new.assigned_to,
            cost: new.cost,
            actual_cost: new.actual_cost,
            estimated_duration: new.estimated_duration,
            actual_duration: new.actual_duration,
        };

        self.check_maintenance(&request)?;

        debug!(id = %request.id, priority = %request.priority, "Adding maintenance request");
        self.maintenance.push(request.clone());
        Ok(request)
    }

    pub fn update_maintenance_request(
        &mut self,
        id: &str,
        patch: MaintenancePatch,
    ) -> StoreResult<MaintenanceRequest> {
        let current = self.maintenance.require(id)?;
        let mut request = current.clone();

        merge_patch!(request <- patch {
            title, description, property_id, maintenance_type, priority,
            status, scheduled_date, completed_date, assigned_to, cost,
            actual_cost, estimated_duration, actual_duration,
        });

        if request == *current {
            return Ok(request);
        }

        self.check_maintenance(&request)?;

        debug!(id = %request.id, status = %request.status, "Updating maintenance request");
        self.maintenance.replace(request.clone())?;
        Ok(request)
    }

    fn check_maintenance(&self, request: &MaintenanceRequest) -> StoreResult<()> {
        let result = validate_maintenance(request)
            .map_err(StoreError::from)
            .and_then(|()| match request.property_id.as_deref() {
                Some(property_id) => self.require_property(property_id).map(|_| ()),
                None => Ok(()),
            });

        if let Err(err) = &result {
            warn!(id = %request.id, error = %err, "Maintenance request rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::new_maintenance;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_complete_request() {
        let mut store = EntityStore::new();
        let request = store.add_maintenance_request(new_maintenance(None)).unwrap();

        let without_date = store.update_maintenance_request(
            &request.id,
            MaintenancePatch {
                status: Some(MaintenanceStatus::Completed),
                ..Default::default()
            },
        );
        assert!(without_date.is_err());

        let done = store
            .update_maintenance_request(
                &request.id,
                MaintenancePatch {
                    status: Some(MaintenanceStatus::Completed),
                    completed_date: Some(Some(date(2024, 4, 11))),
                    actual_cost: Some(Some(3_400.0)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(done.cost_variance(), Some(400.0));
    }

    #[test]
    fn test_unknown_property_rejected() {
        let mut store = EntityStore::new();
        let result = store.add_maintenance_request(new_maintenance(Some("ghost")));
        assert!(matches!(result, Err(StoreError::UnknownReference { .. })));
        assert!(store.maintenance().is_empty());
    }
}
