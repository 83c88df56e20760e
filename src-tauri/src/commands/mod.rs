pub mod auth;
pub mod config;
pub mod params;
pub mod predictions;
