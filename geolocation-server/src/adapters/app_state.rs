use std::sync::Arc;

use crate::adapters::geolocation_client::GeolocationClient;
use crate::domain::ports::store::GeolocationStore;

/// Shared per-request context: the record store and the provider client,
/// both read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GeolocationStore>,
    pub geo_client: GeolocationClient,
}
