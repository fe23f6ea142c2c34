//! Tariff domain entities

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rate returned when neither the country pair nor the destination
/// fallback has an entry for the category.
pub const DEFAULT_TARIFF_RATE: f64 = 10.0;

/// Description paired with [`DEFAULT_TARIFF_RATE`].
pub const DEFAULT_TARIFF_DESCRIPTION: &str = "Standard tariff rate";

/// Origin used for the per-destination fallback entries.
pub const FALLBACK_ORIGIN: &str = "Other";

/// Applicable duty for one country pair and product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffInfo {
    /// Percentage duty (25.0 means 25%)
    pub rate: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

impl TariffInfo {
    pub fn new(rate: f64, description: impl Into<String>) -> Self {
        Self {
            rate,
            description: description.into(),
            hs_code: None,
            effective_date: None,
        }
    }

    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// The catch-all rate used when the table has no matching entry.
    pub fn standard() -> Self {
        Self::new(DEFAULT_TARIFF_RATE, DEFAULT_TARIFF_DESCRIPTION)
    }
}

/// Build the outer table key for a country pair, e.g. `"China-United States"`.
pub fn country_pair_key(origin: &str, destination: &str) -> String {
    format!("{}-{}", origin, destination)
}

/// Two-level rate table: country pair key, then product category.
///
/// Keys are matched exactly and case-sensitively. The table is read-only
/// once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TariffTable {
    pairs: BTreeMap<String, BTreeMap<String, TariffInfo>>,
}

impl TariffTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used when assembling a table at startup.
    pub fn with_rate(
        mut self,
        origin: &str,
        destination: &str,
        category: impl Into<String>,
        info: TariffInfo,
    ) -> Self {
        self.pairs
            .entry(country_pair_key(origin, destination))
            .or_default()
            .insert(category.into(), info);
        self
    }

    /// Insert under an already-built pair key, replacing any previous entry.
    pub fn insert(&mut self, pair_key: impl Into<String>, category: impl Into<String>, info: TariffInfo) {
        self.pairs
            .entry(pair_key.into())
            .or_default()
            .insert(category.into(), info);
    }

    /// Exact lookup by pre-built pair key and category.
    pub fn get(&self, pair_key: &str, category: &str) -> Option<&TariffInfo> {
        self.pairs.get(pair_key).and_then(|rates| rates.get(category))
    }

    pub fn contains_pair(&self, pair_key: &str) -> bool {
        self.pairs.contains_key(pair_key)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, TariffInfo>)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of (pair, category) entries.
    pub fn len(&self) -> usize {
        self.pairs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Tests ──────────────────────────────────────────────────────
