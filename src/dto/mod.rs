//! DTOs de la API
//!
//! Requests con validación (`validator`) y payloads de respuesta.

pub mod product_dto;
pub mod role_dto;
pub mod user_dto;
pub mod vehicle_dto;

use serde::Serialize;
use validator::ValidationErrors;

use crate::utils::errors::field_error;

/// Envoltorio de respuesta de las mutaciones
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Opción de selector con etiqueta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labeled<V> {
    pub label: &'static str,
    pub value: V,
}

/// Cadena vacía o sólo espacios como ausente
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Errores del derive más las reglas que dependen de varios campos
pub fn merge_errors(
    derived: Result<(), ValidationErrors>,
    extra: impl FnOnce(&mut ValidationErrors),
) -> Result<(), ValidationErrors> {
    let mut errors = derived.err().unwrap_or_else(ValidationErrors::new);
    extra(&mut errors);
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Marcar un campo como obligatorio
pub fn require(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>, label: &str) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.add(
            field,
            field_error(field, "required", format!("The {} field is required.", label)),
        );
    }
}
