// Application layer - Use cases and the data-access core
pub mod errors;
pub mod interval_cache;
pub mod location_service;
pub mod noise_repository;
pub mod series_service;
