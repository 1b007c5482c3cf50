//! Utilidades de validación
//!
//! Conversión de identificadores recibidos por la API y validadores
//! reutilizados por los DTOs.

use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::AppError;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Convierte el identificador de un recurso en un `Uuid`, sin tocar el almacén
pub fn parse_identifier(resource: &str, value: &str) -> Result<Uuid, AppError> {
    validate_uuid(value)
        .map_err(|_| AppError::Validation(format!("Invalid {} id '{}'", resource, value)))
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        let id = Uuid::new_v4();
        assert_eq!(parse_identifier("ride", &id.to_string()).unwrap(), id);

        let err = parse_identifier("ride", "not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("not-a-uuid")));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Z1").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
