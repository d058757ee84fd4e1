use chrono::{DateTime, Utc};

use crate::listing::{ListSchema, Value};
use crate::models::{NewVehicle, Vehicle, VEHICLE_SCHEMA};
use crate::repositories::store::{Assignments, Resource};

impl Assignments for NewVehicle {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("brand", Value::from(self.brand.as_str())),
            ("model", Value::from(self.model.as_str())),
            ("color", Value::from(self.color.as_str())),
            ("registration_number", Value::from(self.registration_number.as_str())),
            ("vendor", Value::from(self.vendor.clone())),
            ("is_active", Value::Bool(self.is_active)),
        ]
    }
}

impl Resource for Vehicle {
    type New = NewVehicle;
    type Changes = NewVehicle;

    const NAME: &'static str = "Vehicle";
    const UNIQUE: &'static [&'static str] = &["registration_number"];

    fn schema() -> &'static ListSchema {
        &VEHICLE_SCHEMA
    }

    fn create(id: i64, new: NewVehicle, now: DateTime<Utc>) -> Self {
        Vehicle {
            id,
            brand: new.brand,
            model: new.model,
            color: new.color,
            registration_number: new.registration_number,
            vendor: new.vendor,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: NewVehicle, now: DateTime<Utc>) {
        self.brand = changes.brand;
        self.model = changes.model;
        self.color = changes.color;
        self.registration_number = changes.registration_number;
        self.vendor = changes.vendor;
        self.is_active = changes.is_active;
        self.updated_at = now;
    }
}
