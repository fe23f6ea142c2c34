//! # Landed Cost
//!
//! Import landed-cost estimation: resolves the tariff for an origin,
//! destination and product category and aggregates product, shipping,
//! insurance, tariff and fees into a per-unit and total landed cost.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Tariff table, resolution and the two calculation models
//! - **application**: Calculator services and calculator form parsing
//! - **infrastructure**: Rate sheet sources (built-in demo sheet, TOML file)
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Server lifecycle and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
