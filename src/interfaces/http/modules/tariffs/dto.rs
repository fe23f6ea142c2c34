//! Tariff DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::TariffInfo;

/// Tariff rate entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TariffResponse {
    /// Percentage duty
    pub rate: f64,
    pub description: String,
    pub hs_code: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

impl From<TariffInfo> for TariffResponse {
    fn from(t: TariffInfo) -> Self {
        Self {
            rate: t.rate,
            description: t.description,
            hs_code: t.hs_code,
            effective_date: t.effective_date,
        }
    }
}

/// One row of the rate table
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TariffEntryResponse {
    /// `"<origin>-<destination>"`
    pub country_pair: String,
    pub category: String,
    pub tariff: TariffResponse,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveTariffParams {
    pub origin: String,
    pub destination: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateSheetStatusResponse {
    pub last_updated: DateTime<Utc>,
    pub age_days: f64,
    pub stale_after_days: i64,
    pub needs_update: bool,
    pub entries: usize,
}
