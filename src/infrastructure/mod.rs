// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod noise_api;
pub mod schema;
