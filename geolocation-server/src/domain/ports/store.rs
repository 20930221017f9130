use async_trait::async_trait;

use crate::domain::errors::AppError;
use crate::domain::models::Geolocation;

/// Persistence port for geolocation records. Handlers depend on this trait
/// rather than on the MongoDB driver directly.
#[async_trait]
pub trait GeolocationStore: Send + Sync + 'static {
    /// Inserts a new record. Fails with `AlreadyExists` when a record with
    /// the same IP is already stored.
    async fn create(&self, record: Geolocation) -> Result<Geolocation, AppError>;

    /// Finds a record by IP, failing with `NotFound` when absent.
    async fn get_by_ip(&self, ip: &str) -> Result<Geolocation, AppError>;

    /// Removes the record for `ip` if present. Returns whether a record was
    /// actually removed; deleting an absent IP is not an error.
    async fn delete(&self, ip: &str) -> Result<bool, AppError>;

    /// Returns every stored record in store-native order.
    async fn list_all(&self) -> Result<Vec<Geolocation>, AppError>;
}
