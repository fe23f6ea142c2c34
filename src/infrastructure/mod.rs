//! Infrastructure layer - external concerns

pub mod storage;

pub use storage::{demo_rate_sheet, load_rate_sheet, RateSheetError};
