use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::dto::vehicle_dto::{
    vehicle_statuses, VehicleEditResponse, VehicleFilterOptions, VehicleFormOptions,
    VehicleIndexResponse, VehicleRequest, VehicleStats,
};
use crate::listing::{ListParams, ListQuery, Value};
use crate::models::{Vehicle, VEHICLE_SCHEMA};
use crate::repositories::Store;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, unique_error, AppError, AppResult};

pub struct VehicleController {
    vehicles: Arc<dyn Store<Vehicle>>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn index(&self, params: &ListParams) -> AppResult<VehicleIndexResponse> {
        let query = ListQuery::from_params(&VEHICLE_SCHEMA, params)?;
        let vehicles = self.vehicles.list(&query).await?;

        let filter_options = VehicleFilterOptions {
            brands: self.vehicles.distinct("brand").await?,
            colors: self.vehicles.distinct("color").await?,
            statuses: vehicle_statuses(),
        };

        let stats = VehicleStats {
            total: self.vehicles.count().await?,
            active: self.vehicles.count_where("is_active", Value::Bool(true)).await?,
            brands: self.vehicles.count_distinct("brand").await?,
            inactive: self.vehicles.count_where("is_active", Value::Bool(false)).await?,
        };

        Ok(VehicleIndexResponse {
            vehicles,
            filter_options,
            stats,
            query_params: params.echo(),
        })
    }

    pub fn create_options(&self) -> VehicleFormOptions {
        VehicleFormOptions {
            statuses: vehicle_statuses(),
        }
    }

    pub async fn store(&self, request: VehicleRequest) -> AppResult<Vehicle> {
        let request = request.normalized();
        request.validate()?;
        self.ensure_unique_registration(&request.registration_number, None).await?;

        let vehicle = self.vehicles.insert(request.into_vehicle(true)).await?;
        tracing::info!("🚚 Vehicle {} registered ({})", vehicle.id, vehicle.registration_number);
        Ok(vehicle)
    }

    pub async fn show(&self, id: i64) -> AppResult<Vehicle> {
        self.vehicles
            .find(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn edit(&self, id: i64) -> AppResult<VehicleEditResponse> {
        Ok(VehicleEditResponse {
            vehicle: self.show(id).await?,
            options: self.create_options(),
        })
    }

    pub async fn update(&self, id: i64, request: VehicleRequest) -> AppResult<Vehicle> {
        let current = self.show(id).await?;

        let request = request.normalized();
        request.validate()?;
        self.ensure_unique_registration(&request.registration_number, Some(id)).await?;

        self.vehicles
            .update(id, request.into_vehicle(current.is_active))
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        tracing::info!("🗑️ Vehicle {} deleted", id);
        Ok(())
    }

    async fn ensure_unique_registration(&self, registration: &str, except: Option<i64>) -> AppResult<()> {
        let registration = registration.trim();
        if self
            .vehicles
            .exists("registration_number", Value::from(registration), except)
            .await?
        {
            let mut errors = ValidationErrors::new();
            errors.add(
                "registration_number",
                unique_error("registration_number", "registration number"),
            );
            return Err(AppError::Validation(errors));
        }
        Ok(())
    }
}
