pub mod driver_controller;
pub mod passenger_controller;

pub use driver_controller::DriverController;
pub use passenger_controller::PassengerController;
