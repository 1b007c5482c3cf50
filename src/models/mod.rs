//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de cada servicio.

pub mod driver;
pub mod passenger;
pub mod ride;

pub use driver::Driver;
pub use passenger::Passenger;
pub use ride::{NewRide, PaymentStatus, Ride, RideStatus};
