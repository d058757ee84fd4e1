use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::{blank_to_none, Labeled};
use crate::listing::{Page, QueryParams};
use crate::models::{NewVehicle, Vehicle};
use crate::utils::validation::validate_not_blank;

// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VehicleRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub brand: String,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub model: String,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub color: String,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub registration_number: String,
    #[validate(length(max = 255))]
    pub vendor: Option<String>,
    pub is_active: Option<bool>,
}

impl VehicleRequest {
    pub fn normalized(mut self) -> Self {
        self.vendor = blank_to_none(self.vendor);
        self
    }

    /// `is_active` ausente toma `default_active` (true al crear, el actual al editar)
    pub fn into_vehicle(self, default_active: bool) -> NewVehicle {
        NewVehicle {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            color: self.color.trim().to_string(),
            registration_number: self.registration_number.trim().to_string(),
            vendor: self.vendor,
            is_active: self.is_active.unwrap_or(default_active),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleFilterOptions {
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub statuses: Vec<Labeled<bool>>,
}

#[derive(Debug, Serialize)]
pub struct VehicleStats {
    pub total: u64,
    pub active: u64,
    pub brands: u64,
    pub inactive: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleIndexResponse {
    pub vehicles: Page<Vehicle>,
    pub filter_options: VehicleFilterOptions,
    pub stats: VehicleStats,
    pub query_params: QueryParams,
}

/// Opciones de estado activo/inactivo
pub fn vehicle_statuses() -> Vec<Labeled<bool>> {
    vec![
        Labeled { label: "Active", value: true },
        Labeled { label: "Inactive", value: false },
    ]
}

#[derive(Debug, Serialize)]
pub struct VehicleFormOptions {
    pub statuses: Vec<Labeled<bool>>,
}

#[derive(Debug, Serialize)]
pub struct VehicleEditResponse {
    pub vehicle: Vehicle,
    #[serde(flatten)]
    pub options: VehicleFormOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_is_active_takes_the_default() {
        let request: VehicleRequest = serde_json::from_value(json!({
            "brand": "Toyota", "model": "Hiace", "color": "Silver",
            "registration_number": "DHA-GA-1122", "vendor": "",
        }))
        .unwrap();
        let vehicle = request.normalized().into_vehicle(true);
        assert!(vehicle.is_active);
        assert_eq!(vehicle.vendor, None);
    }

    #[test]
    fn blank_required_fields_fail() {
        let request: VehicleRequest = serde_json::from_value(json!({
            "brand": " ", "model": "Hiace", "color": "Silver", "registration_number": "",
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("brand"));
        assert!(errors.errors().contains_key("registration_number"));
    }
}
