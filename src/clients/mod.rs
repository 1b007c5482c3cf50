//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with the other
//! RideNow services.

pub mod driver_directory_client;

// Re-export main types for convenience
pub use driver_directory_client::{
    DirectoryDriver,
    DirectoryError,
    DriverDirectory,
    HttpDriverDirectory,
};
