use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para crear o renombrar un pasajero
#[derive(Debug, Deserialize, Validate)]
pub struct PassengerRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}
