//! Rate sheet loaded from a TOML file
//!
//! Dates may be written either as TOML date/datetime literals
//! (`last_updated = 2025-01-01T00:00:00Z`) or as quoted strings.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{RateSheet, TariffInfo, TariffTable};

#[derive(Debug, Error)]
pub enum RateSheetError {
    #[error("Failed to read rate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rate file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {field} in rate file: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Rate file contains no rates")]
    Empty,
}

/// On-disk layout of a rate file.
#[derive(Debug, Deserialize)]
struct RateFile {
    last_updated: DateText,
    rates: BTreeMap<String, BTreeMap<String, RateEntry>>,
}

#[derive(Debug, Deserialize)]
struct RateEntry {
    rate: f64,
    description: String,
    #[serde(default)]
    hs_code: Option<String>,
    #[serde(default)]
    effective_date: Option<DateText>,
}

/// Date or datetime as text, from either a TOML literal or a string.
#[derive(Debug)]
struct DateText(String);

impl<'de> Deserialize<'de> for DateText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateTextVisitor;

        impl<'de> Visitor<'de> for DateTextVisitor {
            type Value = DateText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a TOML date, a TOML datetime or an RFC 3339 string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DateText, E> {
                Ok(DateText(v.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<DateText, A::Error> {
                let datetime =
                    toml::value::Datetime::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(DateText(datetime.to_string()))
            }
        }

        deserializer.deserialize_any(DateTextVisitor)
    }
}

impl DateText {
    /// Offset datetimes are converted to UTC; local datetimes and bare
    /// dates are taken as UTC.
    fn to_utc(&self, field: &'static str) -> Result<DateTime<Utc>, RateSheetError> {
        let s = self.0.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| self.invalid(field))
    }

    fn to_date(&self, field: &'static str) -> Result<NaiveDate, RateSheetError> {
        NaiveDate::parse_from_str(self.0.trim(), "%Y-%m-%d").map_err(|_| self.invalid(field))
    }

    fn invalid(&self, field: &'static str) -> RateSheetError {
        RateSheetError::InvalidDate {
            field,
            value: self.0.clone(),
        }
    }
}

impl RateFile {
    fn into_rate_sheet(self) -> Result<RateSheet, RateSheetError> {
        let last_updated = self.last_updated.to_utc("last_updated")?;

        let mut table = TariffTable::new();
        for (pair_key, categories) in self.rates {
            for (category, entry) in categories {
                let effective_date = entry
                    .effective_date
                    .map(|d| d.to_date("effective_date"))
                    .transpose()?;
                table.insert(
                    pair_key.clone(),
                    category,
                    TariffInfo {
                        rate: entry.rate,
                        description: entry.description,
                        hs_code: entry.hs_code,
                        effective_date,
                    },
                );
            }
        }

        Ok(RateSheet::new(last_updated, table))
    }
}

/// Parse a rate sheet from TOML text.
pub fn parse_rate_sheet(content: &str) -> Result<RateSheet, RateSheetError> {
    let file: RateFile = toml::from_str(content)?;
    let sheet = file.into_rate_sheet()?;
    if sheet.table.is_empty() {
        return Err(RateSheetError::Empty);
    }
    Ok(sheet)
}

pub fn load_rate_sheet(path: &Path) -> Result<RateSheet, RateSheetError> {
    let content = std::fs::read_to_string(path)?;
    let sheet = parse_rate_sheet(&content)?;
    info!(
        path = %path.display(),
        entries = sheet.table.len(),
        last_updated = %sheet.last_updated,
        "Rate sheet loaded"
    );
    Ok(sheet)
}

// ── Tests ──────────────────────────────────────────────────────
