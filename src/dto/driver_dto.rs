use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

// Request para cambiar la disponibilidad
#[derive(Debug, Deserialize)]
pub struct UpdateDriverStatusRequest {
    pub is_available: bool,
}

// Query del listado; solo `available=true` filtra
#[derive(Debug, Default, Deserialize)]
pub struct DriverListQuery {
    pub available: Option<String>,
}

impl DriverListQuery {
    pub fn only_available(&self) -> bool {
        self.available.as_deref() == Some("true")
    }
}
