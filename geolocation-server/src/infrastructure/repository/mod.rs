pub mod geolocation_repository;
