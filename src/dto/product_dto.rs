use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::dto::{blank_to_none, Labeled};
use crate::listing::{Page, QueryParams};
use crate::models::{NewProduct, Product, ProductStatus};
use crate::utils::validation::{validate_enum, validate_non_negative, validate_not_blank};

fn validate_product_status(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &ProductStatus::ALL)
}

/// Mayor precio que cabe en la columna `NUMERIC(10, 2)`
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Precio no negativo que, redondeado a centavos, cabe en la columna
fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if value.round_dp(2) > max_price() {
        let mut error = ValidationError::new("max");
        error.message = Some(Cow::Owned(format!("The price may not be greater than {}.", max_price())));
        error.add_param("value".into(), value);
        error.add_param("max".into(), &max_price());
        return Err(error);
    }
    Ok(())
}

// Request para crear o actualizar un producto
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub category: String,
    #[validate(custom = "validate_product_status")]
    pub status: String,
}

impl ProductRequest {
    pub fn normalized(mut self) -> Self {
        self.description = blank_to_none(self.description);
        self
    }

    pub fn into_product(self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price.round_dp(2),
            category: self.category.trim().to_string(),
            status: ProductStatus::from_str(&self.status).unwrap_or(ProductStatus::Pending),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductFilterOptions {
    pub categories: Vec<String>,
    pub statuses: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ProductStats {
    pub total: u64,
    pub active: u64,
    pub pending: u64,
    pub categories: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIndexResponse {
    pub products: Page<Product>,
    pub filter_options: ProductFilterOptions,
    pub stats: ProductStats,
    pub query_params: QueryParams,
}

#[derive(Debug, Serialize)]
pub struct ProductFormOptions {
    pub categories: Vec<String>,
    pub statuses: Vec<Labeled<&'static str>>,
}

impl ProductFormOptions {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            statuses: [ProductStatus::Active, ProductStatus::Inactive, ProductStatus::Pending]
                .iter()
                .map(|status| Labeled {
                    label: status.label(),
                    value: status.as_str(),
                })
                .collect(),
        }
    }
}

/// Cabecera del CSV de exportación, en el orden de [`ProductExportRow`]
pub const EXPORT_HEADERS: [&str; 8] = [
    "ID", "Name", "Description", "Price", "Category", "Status", "Created At", "Updated At",
];

/// Fila del CSV de exportación
#[derive(Debug, Serialize)]
pub struct ProductExportRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub price: String,
    pub category: &'a str,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl<'a> From<&'a Product> for ProductExportRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id,
            name: &product.name,
            description: product.description.as_deref().unwrap_or(""),
            price: product.price.round_dp(2).to_string(),
            category: &product.category,
            status: product.status.label(),
            created_at: product.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: product.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductEditResponse {
    pub product: Product,
    #[serde(flatten)]
    pub options: ProductFormOptions,
}
