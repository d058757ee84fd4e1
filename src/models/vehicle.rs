//! Modelo de Vehicle
//!
//! Mapea la tabla `vehicles`; `registration_number` es único.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::listing::{FilterColumn, FilterKind, ListSchema, Listable, SortDirection, Value};

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub registration_number: String,
    pub vendor: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub registration_number: String,
    pub vendor: Option<String>,
    pub is_active: bool,
}

/// Una actualización reemplaza todos los campos escribibles
pub type VehicleChanges = NewVehicle;

pub static VEHICLE_SCHEMA: ListSchema = ListSchema {
    table: "vehicles",
    primary_key: "id",
    searchable: &["brand", "model", "color", "registration_number", "vendor"],
    sortable: &[
        "id",
        "brand",
        "model",
        "color",
        "registration_number",
        "vendor",
        "is_active",
        "created_at",
    ],
    filterable: &[
        FilterColumn { name: "brand", kind: FilterKind::Text },
        FilterColumn { name: "color", kind: FilterKind::Text },
        FilterColumn { name: "is_active", kind: FilterKind::Boolean },
    ],
    default_sort: "created_at",
    default_direction: SortDirection::Desc,
    default_per_page: 10,
    max_per_page: 100,
};

impl Listable for Vehicle {
    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "id" => Value::Int(self.id),
            "brand" => Value::from(self.brand.as_str()),
            "model" => Value::from(self.model.as_str()),
            "color" => Value::from(self.color.as_str()),
            "registration_number" => Value::from(self.registration_number.as_str()),
            "vendor" => Value::from(self.vendor.clone()),
            "is_active" => Value::Bool(self.is_active),
            "created_at" => Value::from(self.created_at),
            "updated_at" => Value::from(self.updated_at),
            _ => Value::Null,
        }
    }
}
