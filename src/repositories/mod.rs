pub mod driver_repository;
pub mod in_memory;
pub mod passenger_repository;
pub mod ride_repository;

pub use driver_repository::{DriverRepository, PgDriverRepository};
pub use in_memory::{InMemoryDriverRepository, InMemoryPassengerRepository, InMemoryRideRepository};
pub use passenger_repository::{PassengerRepository, PgPassengerRepository};
pub use ride_repository::{PgRideRepository, RideRepository};
