pub mod error;
pub mod landed_cost;
pub mod tariff;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use landed_cost::{
    CostComponents, DutyValueInputs, DutyValueResults, MarginInputs, MarginResults,
};
pub use tariff::{
    resolve_from_table, RateSheet, TableTariffResolver, TariffInfo, TariffResolver, TariffTable,
};
