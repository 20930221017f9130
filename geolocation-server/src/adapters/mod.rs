pub mod app_state;
pub mod geolocation_client;
pub mod http;
pub mod resolve_identifier;
