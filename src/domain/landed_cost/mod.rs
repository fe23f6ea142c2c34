//! Landed cost calculations
//!
//! Two independent models:
//!
//! - **duty_value**: tariff resolved from trade data and applied to the
//!   customs dutiable value, with a per-component percentage breakdown
//! - **margin**: tariff rate supplied by the caller and applied to the
//!   product cost, projected to a selling price and profit

pub mod duty_value;
pub mod margin;

pub use duty_value::{CostComponents, DutyValueInputs, DutyValueResults};
pub use margin::{MarginInputs, MarginResults};
