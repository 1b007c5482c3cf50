//! RideNow
//!
//! Servicio de viajes (ciclo de vida, precio, pago) y servicio de
//! directorio de conductores y pasajeros, ambos sobre Axum y PostgreSQL.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;
