pub mod form;
pub mod services;

// Re-export key types for convenience
pub use form::CalculatorFormData;
pub use services::{DutyValueCalculation, LandedCostByDutyValue, LandedCostByMargin};
