//! Application services

mod duty_value;
mod margin;

pub use duty_value::{DutyValueCalculation, LandedCostByDutyValue};
pub use margin::LandedCostByMargin;
