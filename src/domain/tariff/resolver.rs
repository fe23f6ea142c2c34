//! Tariff rate resolution
//!
//! Resolution order, first match wins:
//! 1. `"<origin>-<destination>"` pair with the category
//! 2. `"Other-<destination>"` pair with the category
//! 3. [`TariffInfo::standard`]

use std::sync::Arc;

use super::model::{country_pair_key, TariffInfo, TariffTable, FALLBACK_ORIGIN};

/// Source of tariff rates for the dutiable-value calculator.
///
/// Implementations must be total: every call returns some rate.
pub trait TariffResolver: Send + Sync {
    fn resolve(&self, origin: &str, destination: &str, category: &str) -> TariffInfo;
}

/// Apply the fallback policy to a table.
pub fn resolve_from_table(
    table: &TariffTable,
    origin: &str,
    destination: &str,
    category: &str,
) -> TariffInfo {
    if let Some(info) = table.get(&country_pair_key(origin, destination), category) {
        return info.clone();
    }

    if let Some(info) = table.get(&country_pair_key(FALLBACK_ORIGIN, destination), category) {
        return info.clone();
    }

    TariffInfo::standard()
}

/// Resolver backed by an in-memory [`TariffTable`].
#[derive(Debug, Clone)]
pub struct TableTariffResolver {
    table: Arc<TariffTable>,
}

impl TableTariffResolver {
    pub fn new(table: Arc<TariffTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TariffTable {
        &self.table
    }
}

impl TariffResolver for TableTariffResolver {
    fn resolve(&self, origin: &str, destination: &str, category: &str) -> TariffInfo {
        resolve_from_table(&self.table, origin, destination, category)
    }
}

// ── Tests ──────────────────────────────────────────────────────
