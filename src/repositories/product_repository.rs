use chrono::{DateTime, Utc};

use crate::listing::{ListSchema, Value};
use crate::models::{NewProduct, Product, PRODUCT_SCHEMA};
use crate::repositories::store::{Assignments, Resource};

impl Assignments for NewProduct {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.as_str())),
            ("description", Value::from(self.description.clone())),
            ("price", Value::Decimal(self.price)),
            ("category", Value::from(self.category.as_str())),
            ("status", Value::from(self.status.as_str())),
        ]
    }
}

impl Resource for Product {
    type New = NewProduct;
    type Changes = NewProduct;

    const NAME: &'static str = "Product";

    fn schema() -> &'static ListSchema {
        &PRODUCT_SCHEMA
    }

    fn create(id: i64, new: NewProduct, now: DateTime<Utc>) -> Self {
        Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: NewProduct, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = changes.description;
        self.price = changes.price;
        self.category = changes.category;
        self.status = changes.status;
        self.updated_at = now;
    }
}
