//! Modelo de Product

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::listing::{FilterColumn, FilterKind, ListSchema, Listable, SortDirection, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Pending,
}

impl ProductStatus {
    pub const ALL: [&'static str; 3] = ["active", "inactive", "pending"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Pending => "pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            "pending" => Some(ProductStatus::Pending),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
            ProductStatus::Pending => "Pending",
        }
    }
}

/// Product - mapea a la tabla products; el precio es NUMERIC(10,2)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub status: ProductStatus,
}

pub type ProductChanges = NewProduct;

pub static PRODUCT_SCHEMA: ListSchema = ListSchema {
    table: "products",
    primary_key: "id",
    searchable: &["name", "description", "category"],
    sortable: &["id", "name", "price", "category", "status", "created_at"],
    filterable: &[
        FilterColumn { name: "category", kind: FilterKind::Text },
        FilterColumn { name: "status", kind: FilterKind::OneOf(&ProductStatus::ALL) },
    ],
    default_sort: "created_at",
    default_direction: SortDirection::Desc,
    default_per_page: 10,
    max_per_page: 100,
};

impl Listable for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "id" => Value::Int(self.id),
            "name" => Value::from(self.name.as_str()),
            "description" => Value::from(self.description.clone()),
            "price" => Value::Decimal(self.price),
            "category" => Value::from(self.category.as_str()),
            "status" => Value::from(self.status.as_str()),
            "created_at" => Value::from(self.created_at),
            "updated_at" => Value::from(self.updated_at),
            _ => Value::Null,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status_raw: String = row.try_get("status")?;
        let status = ProductStatus::from_str(&status_raw).ok_or_else(|| {
            sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unexpected value '{}'", status_raw).into(),
            }
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_sorts_numerically() {
        let cheap = Value::Decimal(Decimal::new(950, 2));
        let pricey = Value::Decimal(Decimal::new(1200, 2));
        assert_eq!(cheap.sort_cmp(&pricey), std::cmp::Ordering::Less);
    }

    #[test]
    fn status_domain_round_trips() {
        for raw in ProductStatus::ALL {
            assert_eq!(ProductStatus::from_str(raw).map(|s| s.as_str()), Some(raw));
        }
    }
}
