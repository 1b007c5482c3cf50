//! Services module
//!
//! Este módulo contiene la lógica de negocio de los viajes y las piezas
//! intercambiables que usa (precio, pago y selección de conductor).

pub mod driver_selection;
pub mod payment_service;
pub mod pricing_service;
pub mod ride_lifecycle_service;

pub use driver_selection::{DriverSelectionPolicy, FirstListedDriver};
pub use payment_service::{PaymentError, PaymentGateway, SimulatedPaymentGateway};
pub use pricing_service::{FixedPricing, PricingStrategy, RandomZonePricing};
pub use ride_lifecycle_service::{RideLifecycleService, RideRequest};
