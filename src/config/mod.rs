//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y las variables
//! de entorno de ambos servicios.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
