pub mod driver_dto;
pub mod passenger_dto;
pub mod ride_dto;
