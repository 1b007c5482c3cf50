//! Selección de conductor
//!
//! Recibe la lista ordenada que devuelve el directorio y elige uno.

use crate::clients::driver_directory_client::DirectoryDriver;

pub trait DriverSelectionPolicy: Send + Sync {
    fn select<'a>(&self, candidates: &'a [DirectoryDriver]) -> Option<&'a DirectoryDriver>;
}

/// Primer conductor en el orden del directorio, sin más criterios.
#[derive(Debug, Default, Clone)]
pub struct FirstListedDriver;

impl DriverSelectionPolicy for FirstListedDriver {
    fn select<'a>(&self, candidates: &'a [DirectoryDriver]) -> Option<&'a DirectoryDriver> {
        candidates.first()
    }
}
