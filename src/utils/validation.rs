//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los requests y por el motor de listados.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Teléfono: dígitos con un `+` opcional y separadores comunes
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9\s\-()]{3,19}$").unwrap();
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("in");
        error.message = Some(Cow::Borrowed("The selected value is invalid."));
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("This field is required."));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some(Cow::Borrowed("The value must be at least 0."));
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Interpretar un flag booleano tal como llega en query strings
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Interpretar un entero positivo dentro de un rango cerrado
pub fn parse_bounded_u32(value: &str, min: u32, max: u32) -> Result<u32, ValidationError> {
    let parsed = value.trim().parse::<u32>().ok().filter(|n| (min..=max).contains(n));
    parsed.ok_or_else(|| {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Owned(format!(
            "The value must be an integer between {} and {}.",
            min, max
        )));
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("value".into(), &value);
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_enum() {
        let allowed = ["admin", "driver"];
        assert!(validate_enum("admin", &allowed).is_ok());
        assert!(validate_enum("user", &allowed).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Toyota").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::new(1999, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+1234567890"));
        assert!(PHONE_REGEX.is_match("01711-223344"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("+12"));
    }

    #[test]
    fn test_parse_bool_flag() {
        assert_eq!(parse_bool_flag("1"), Some(true));
        assert_eq!(parse_bool_flag("false"), Some(false));
        assert_eq!(parse_bool_flag("yes"), None);
    }

    #[test]
    fn test_parse_bounded_u32() {
        assert_eq!(parse_bounded_u32("25", 1, 100).unwrap(), 25);
        assert!(parse_bounded_u32("0", 1, 100).is_err());
        assert!(parse_bounded_u32("101", 1, 100).is_err());
        assert!(parse_bounded_u32("ten", 1, 100).is_err());
    }
}
