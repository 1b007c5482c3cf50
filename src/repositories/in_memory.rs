//! Repositorios en memoria
//!
//! Implementaciones sin persistencia para pruebas y desarrollo local.
//! Cada mapa se indexa por id (`DashMap`), así que las escrituras sobre
//! registros distintos no se serializan entre sí.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::passenger::Passenger;
use crate::models::ride::{NewRide, PaymentStatus, Ride, RideStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::passenger_repository::PassengerRepository;
use crate::repositories::ride_repository::RideRepository;
use crate::utils::errors::{not_found_error, AppError};

#[derive(Default)]
pub struct InMemoryRideRepository {
    rides: DashMap<Uuid, Ride>,
}

impl InMemoryRideRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    fn mutate(&self, id: Uuid, apply: impl FnOnce(&mut Ride)) -> Result<(), AppError> {
        let mut entry = self
            .rides
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Ride", &id.to_string()))?;
        apply(entry.value_mut());
        entry.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl RideRepository for InMemoryRideRepository {
    async fn create(&self, ride: NewRide) -> Result<Ride, AppError> {
        let ride = ride.into_ride(Uuid::new_v4());
        self.rides.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>, AppError> {
        Ok(self.rides.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, status: Option<RideStatus>) -> Result<Vec<Ride>, AppError> {
        let mut rides: Vec<Ride> = self
            .rides
            .iter()
            .filter(|entry| status.map_or(true, |s| entry.status == s))
            .map(|entry| entry.value().clone())
            .collect();
        rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rides)
    }

    async fn update_status(&self, id: Uuid, status: RideStatus) -> Result<(), AppError> {
        self.mutate(id, |ride| ride.status = status)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: RideStatus,
        new: RideStatus,
    ) -> Result<bool, AppError> {
        // El lock de la entrada se mantiene entre la comparación y la escritura
        let Some(mut entry) = self.rides.get_mut(&id) else {
            return Ok(false);
        };
        if entry.status != expected {
            return Ok(false);
        }
        entry.status = new;
        entry.updated_at = Utc::now();
        Ok(true)
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<(), AppError> {
        self.mutate(id, |ride| ride.payment_status = status)
    }

    async fn replace_fields(&self, id: Uuid, ride: &Ride) -> Result<(), AppError> {
        self.mutate(id, |stored| {
            stored.passenger_id = ride.passenger_id.clone();
            stored.driver_id = ride.driver_id.clone();
            stored.from_zone = ride.from_zone.clone();
            stored.to_zone = ride.to_zone.clone();
            stored.status = ride.status;
            stored.payment_status = ride.payment_status;
        })
    }
}

/// Directorio de conductores en memoria; conserva el orden de registro.
#[derive(Default)]
pub struct InMemoryDriverRepository {
    drivers: DashMap<Uuid, (u64, Driver)>,
    sequence: AtomicU64,
}

impl InMemoryDriverRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DriverRepository for InMemoryDriverRepository {
    async fn create(&self, name: String) -> Result<Driver, AppError> {
        let driver = Driver {
            id: Uuid::new_v4(),
            name,
            is_available: true,
        };
        let position = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.drivers.insert(driver.id, (position, driver.clone()));
        Ok(driver)
    }

    async fn list(&self, only_available: bool) -> Result<Vec<Driver>, AppError> {
        let mut drivers: Vec<(u64, Driver)> = self
            .drivers
            .iter()
            .filter(|entry| !only_available || entry.1.is_available)
            .map(|entry| entry.value().clone())
            .collect();
        drivers.sort_by_key(|(position, _)| *position);
        Ok(drivers.into_iter().map(|(_, driver)| driver).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        Ok(self.drivers.get(&id).map(|entry| entry.1.clone()))
    }

    async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<Option<Driver>, AppError> {
        Ok(self.drivers.get_mut(&id).map(|mut entry| {
            entry.1.is_available = is_available;
            entry.1.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryPassengerRepository {
    passengers: DashMap<Uuid, (u64, Passenger)>,
    sequence: AtomicU64,
}

impl InMemoryPassengerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn create(&self, name: String) -> Result<Passenger, AppError> {
        let now = Utc::now();
        let passenger = Passenger {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        };
        let position = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.passengers.insert(passenger.id, (position, passenger.clone()));
        Ok(passenger)
    }

    async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        let mut passengers: Vec<(u64, Passenger)> =
            self.passengers.iter().map(|entry| entry.value().clone()).collect();
        passengers.sort_by_key(|(position, _)| *position);
        Ok(passengers.into_iter().map(|(_, passenger)| passenger).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passenger>, AppError> {
        Ok(self.passengers.get(&id).map(|entry| entry.1.clone()))
    }

    async fn update(&self, id: Uuid, name: String) -> Result<Option<Passenger>, AppError> {
        Ok(self.passengers.get_mut(&id).map(|mut entry| {
            entry.1.name = name;
            entry.1.updated_at = Utc::now();
            entry.1.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.passengers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_ride() -> NewRide {
        NewRide::assigned(
            "p1".to_string(),
            "d1".to_string(),
            "Z1".to_string(),
            "Z2".to_string(),
            Decimal::from(30),
        )
    }

    #[tokio::test]
    async fn test_create_and_find_ride() {
        let repo = InMemoryRideRepository::new();
        let ride = repo.create(new_ride()).await.unwrap();

        let found = repo.find_by_id(ride.id).await.unwrap().unwrap();
        assert_eq!(found, ride);
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_updates_keep_other_fields() {
        let repo = InMemoryRideRepository::new();
        let ride = repo.create(new_ride()).await.unwrap();

        repo.update_status(ride.id, RideStatus::InProgress).await.unwrap();
        repo.update_payment_status(ride.id, PaymentStatus::Failed).await.unwrap();

        let stored = repo.find_by_id(ride.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RideStatus::InProgress);
        assert_eq!(stored.payment_status, PaymentStatus::Failed);
        assert_eq!(stored.price, ride.price);
        assert_eq!(stored.driver_id, ride.driver_id);
        assert!(stored.updated_at >= ride.updated_at);
    }

    #[tokio::test]
    async fn test_updates_on_missing_ride_are_not_found() {
        let repo = InMemoryRideRepository::new();
        let err = repo
            .update_status(Uuid::new_v4(), RideStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_compare_and_set_status() {
        let repo = InMemoryRideRepository::new();
        let ride = repo.create(new_ride()).await.unwrap();

        assert!(repo
            .compare_and_set_status(ride.id, RideStatus::Assigned, RideStatus::Completed)
            .await
            .unwrap());
        assert!(!repo
            .compare_and_set_status(ride.id, RideStatus::Assigned, RideStatus::Completed)
            .await
            .unwrap());
        assert!(!repo
            .compare_and_set_status(Uuid::new_v4(), RideStatus::Assigned, RideStatus::Completed)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_replace_fields_keeps_price_and_refreshes_updated_at() {
        let repo = InMemoryRideRepository::new();
        let ride = repo.create(new_ride()).await.unwrap();

        let mut changed = ride.clone();
        changed.to_zone = "Z9".to_string();
        changed.status = RideStatus::Cancelled;
        changed.price = Decimal::from(999);
        repo.replace_fields(ride.id, &changed).await.unwrap();

        let stored = repo.find_by_id(ride.id).await.unwrap().unwrap();
        assert_eq!(stored.to_zone, "Z9");
        assert_eq!(stored.status, RideStatus::Cancelled);
        assert_eq!(stored.price, Decimal::from(30));
        assert_eq!(stored.created_at, ride.created_at);
        assert!(stored.updated_at >= ride.updated_at);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = InMemoryRideRepository::new();
        let first = repo.create(new_ride()).await.unwrap();
        let second = repo.create(new_ride()).await.unwrap();
        repo.update_status(second.id, RideStatus::Completed).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        let assigned = repo.list(Some(RideStatus::Assigned)).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, first.id);
    }

    #[tokio::test]
    async fn test_driver_directory_keeps_registration_order() {
        let repo = InMemoryDriverRepository::new();
        let first = repo.create("d1".to_string()).await.unwrap();
        let second = repo.create("d2".to_string()).await.unwrap();
        assert!(first.is_available);

        repo.set_availability(first.id, false).await.unwrap();
        let available = repo.list(true).await.unwrap();
        assert_eq!(available, vec![second.clone()]);

        let all: Vec<Uuid> = repo.list(false).await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(all, vec![first.id, second.id]);

        assert!(repo.set_availability(Uuid::new_v4(), true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_passenger_crud() {
        let repo = InMemoryPassengerRepository::new();
        let passenger = repo.create("Alice".to_string()).await.unwrap();

        let renamed = repo.update(passenger.id, "Alicia".to_string()).await.unwrap().unwrap();
        assert_eq!(renamed.name, "Alicia");
        assert_eq!(renamed.created_at, passenger.created_at);

        assert!(repo.delete(passenger.id).await.unwrap());
        assert!(!repo.delete(passenger.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
