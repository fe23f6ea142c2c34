//! Shared state for HTTP handlers

use std::sync::Arc;
use std::time::Instant;

use crate::application::{LandedCostByDutyValue, LandedCostByMargin};
use crate::domain::{RateSheet, TableTariffResolver};

#[derive(Clone)]
pub struct AppState {
    pub duty_value: Arc<LandedCostByDutyValue>,
    pub margin: LandedCostByMargin,
    pub rate_sheet: Arc<RateSheet>,
    pub stale_after_days: i64,
    pub started_at: Arc<Instant>,
}

impl AppState {
    /// Wire both calculators around a rate sheet, with the table-backed resolver.
    pub fn from_rate_sheet(rate_sheet: RateSheet, stale_after_days: i64) -> Self {
        let rate_sheet = Arc::new(rate_sheet);
        let resolver = TableTariffResolver::new(Arc::new(rate_sheet.table.clone()));

        Self {
            duty_value: Arc::new(LandedCostByDutyValue::new(Arc::new(resolver))),
            margin: LandedCostByMargin::new(),
            rate_sheet,
            stale_after_days,
            started_at: Arc::new(Instant::now()),
        }
    }
}
