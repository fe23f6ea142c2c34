//! Rate sheet sources: compiled-in demo data and TOML rate files

mod file;
mod memory;

pub use file::{load_rate_sheet, parse_rate_sheet, RateSheetError};
pub use memory::{demo_rate_sheet, demo_tariff_table};
