use std::sync::Arc;

use validator::Validate;

use crate::dto::product_dto::{
    ProductEditResponse, ProductExportRow, ProductFilterOptions, ProductFormOptions,
    ProductIndexResponse, ProductRequest, ProductStats, EXPORT_HEADERS,
};
use crate::listing::{ListParams, ListQuery, Value};
use crate::models::{Product, ProductStatus, PRODUCT_SCHEMA};
use crate::repositories::Store;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ProductController {
    products: Arc<dyn Store<Product>>,
}

impl ProductController {
    pub fn new(state: &AppState) -> Self {
        Self {
            products: state.products.clone(),
        }
    }

    pub async fn index(&self, params: &ListParams) -> AppResult<ProductIndexResponse> {
        let query = ListQuery::from_params(&PRODUCT_SCHEMA, params)?;
        let products = self.products.list(&query).await?;

        let filter_options = ProductFilterOptions {
            categories: self.products.distinct("category").await?,
            statuses: ProductStatus::ALL.to_vec(),
        };

        let stats = ProductStats {
            total: self.products.count().await?,
            active: self.products.count_where("status", Value::from("active")).await?,
            pending: self.products.count_where("status", Value::from("pending")).await?,
            categories: self.products.count_distinct("category").await?,
        };

        Ok(ProductIndexResponse {
            products,
            filter_options,
            stats,
            query_params: params.echo(),
        })
    }

    /// CSV con todos los productos que cumplen búsqueda y filtros
    ///
    /// Usa la misma validación que el listado; `page` y `per_page` se
    /// validan pero no recortan el resultado.
    pub async fn export(&self, params: &ListParams) -> AppResult<Vec<u8>> {
        let query = ListQuery::from_params(&PRODUCT_SCHEMA, params)?;
        let products = self.products.list_all(&query).await?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(EXPORT_HEADERS).map_err(csv_error)?;
        for product in &products {
            writer.serialize(ProductExportRow::from(product)).map_err(csv_error)?;
        }
        let body = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        tracing::info!("📤 Exported {} products", products.len());
        Ok(body)
    }

    pub async fn create_options(&self) -> AppResult<ProductFormOptions> {
        Ok(ProductFormOptions::new(self.products.distinct("category").await?))
    }

    pub async fn store(&self, request: ProductRequest) -> AppResult<Product> {
        let request = request.normalized();
        request.validate()?;
        let product = self.products.insert(request.into_product()).await?;
        tracing::info!("📦 Product {} created", product.id);
        Ok(product)
    }

    pub async fn show(&self, id: i64) -> AppResult<Product> {
        self.products
            .find(id)
            .await?
            .ok_or_else(|| not_found_error("Product", id))
    }

    pub async fn edit(&self, id: i64) -> AppResult<ProductEditResponse> {
        Ok(ProductEditResponse {
            product: self.show(id).await?,
            options: self.create_options().await?,
        })
    }

    pub async fn update(&self, id: i64, request: ProductRequest) -> AppResult<Product> {
        self.show(id).await?;

        let request = request.normalized();
        request.validate()?;
        self.products
            .update(id, request.into_product())
            .await?
            .ok_or_else(|| not_found_error("Product", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.products.delete(id).await? {
            return Err(not_found_error("Product", id));
        }
        tracing::info!("🗑️ Product {} deleted", id);
        Ok(())
    }
}

fn csv_error(error: csv::Error) -> AppError {
    AppError::Internal(format!("CSV export failed: {}", error))
}
