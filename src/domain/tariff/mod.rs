//! Tariff aggregate
//!
//! Contains the rate table, the fallback resolution policy, and the
//! rate sheet freshness metadata.

pub mod model;
pub mod rate_sheet;
pub mod resolver;

pub use model::{country_pair_key, TariffInfo, TariffTable};
pub use rate_sheet::{RateSheet, DEFAULT_STALE_AFTER_DAYS};
pub use resolver::{resolve_from_table, TableTariffResolver, TariffResolver};
