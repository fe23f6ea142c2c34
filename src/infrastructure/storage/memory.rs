//! Compiled-in demo rate sheet
//!
//! Static demo rates for development and testing. They are not official
//! tariff schedules and carry no HS-code granularity.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::{RateSheet, TariffInfo, TariffTable};

const US: &str = "United States";

/// Build the demo sheet, last synchronised 2025-01-01T00:00:00Z.
pub fn demo_rate_sheet() -> RateSheet {
    let last_updated = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    RateSheet::new(last_updated, demo_tariff_table())
}

pub fn demo_tariff_table() -> TariffTable {
    let section_301 = TariffInfo::new(25.0, "Section 301 tariffs on Chinese electronics");
    let section_301 = match NaiveDate::from_ymd_opt(2018, 9, 24) {
        Some(date) => section_301.with_effective_date(date),
        None => section_301,
    };

    TariffTable::new()
        // China → US (Section 301 + general rates)
        .with_rate("China", US, "Electronics", section_301)
        .with_rate("China", US, "Clothing & Textiles", TariffInfo::new(15.0, "Textiles and apparel from China"))
        .with_rate("China", US, "Home & Garden", TariffInfo::new(10.0, "Home goods and furniture"))
        .with_rate("China", US, "Sports & Outdoors", TariffInfo::new(12.0, "Sporting goods and outdoor equipment"))
        .with_rate("China", US, "Health & Beauty", TariffInfo::new(8.0, "Cosmetics and health products"))
        .with_rate("China", US, "Automotive", TariffInfo::new(25.0, "Auto parts and accessories"))
        .with_rate("China", US, "Industrial", TariffInfo::new(20.0, "Industrial equipment and machinery"))
        .with_rate("China", US, "Food & Beverages", TariffInfo::new(18.0, "Food products and beverages"))
        .with_rate("China", US, "Other", TariffInfo::new(15.0, "Other products from China"))
        // Vietnam → US (MFN)
        .with_rate("Vietnam", US, "Electronics", TariffInfo::new(5.0, "MFN rates for Vietnamese electronics"))
        .with_rate("Vietnam", US, "Clothing & Textiles", TariffInfo::new(12.0, "Vietnamese textiles under MFN"))
        .with_rate("Vietnam", US, "Home & Garden", TariffInfo::new(6.0, "Home goods from Vietnam"))
        .with_rate("Vietnam", US, "Sports & Outdoors", TariffInfo::new(8.0, "Sporting goods"))
        .with_rate("Vietnam", US, "Health & Beauty", TariffInfo::new(4.0, "Health and beauty products"))
        .with_rate("Vietnam", US, "Automotive", TariffInfo::new(10.0, "Automotive parts"))
        .with_rate("Vietnam", US, "Industrial", TariffInfo::new(8.0, "Industrial goods"))
        .with_rate("Vietnam", US, "Food & Beverages", TariffInfo::new(15.0, "Food products"))
        .with_rate("Vietnam", US, "Other", TariffInfo::new(7.0, "Other Vietnamese products"))
        // General MFN rates for any other origin
        .with_rate("Other", US, "Electronics", TariffInfo::new(10.0, "General MFN electronics tariff"))
        .with_rate("Other", US, "Clothing & Textiles", TariffInfo::new(12.0, "General textiles tariff"))
        .with_rate("Other", US, "Home & Garden", TariffInfo::new(8.0, "General home goods tariff"))
        .with_rate("Other", US, "Sports & Outdoors", TariffInfo::new(8.0, "General sporting goods tariff"))
        .with_rate("Other", US, "Health & Beauty", TariffInfo::new(6.0, "General health products tariff"))
        .with_rate("Other", US, "Automotive", TariffInfo::new(15.0, "General automotive tariff"))
        .with_rate("Other", US, "Industrial", TariffInfo::new(12.0, "General industrial tariff"))
        .with_rate("Other", US, "Food & Beverages", TariffInfo::new(10.0, "General food tariff"))
        .with_rate("Other", US, "Other", TariffInfo::new(10.0, "General tariff rate"))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolve_from_table;

    #[test]
    fn demo_table_has_three_pairs_of_nine_categories() {
        let t = demo_tariff_table();
        assert_eq!(t.pairs().count(), 3);
        assert_eq!(t.len(), 27);
        assert!(t.pairs().all(|(_, rates)| rates.len() == 9));
    }

    #[test]
    fn every_entry_resolves_to_its_literal() {
        let t = demo_tariff_table();
        for (pair, rates) in t.pairs() {
            let (origin, destination) = pair.split_once('-').unwrap();
            for (category, info) in rates {
                assert_eq!(&resolve_from_table(&t, origin, destination, category), info);
            }
        }
    }

    #[test]
    fn reference_lookups() {
        let t = demo_tariff_table();

        let cn = resolve_from_table(&t, "China", "United States", "Electronics");
        assert_eq!(cn.rate, 25.0);
        assert_eq!(cn.description, "Section 301 tariffs on Chinese electronics");
        assert_eq!(cn.effective_date, NaiveDate::from_ymd_opt(2018, 9, 24));

        let de = resolve_from_table(&t, "Germany", "United States", "Electronics");
        assert_eq!(de, TariffInfo::new(10.0, "General MFN electronics tariff"));

        let ca = resolve_from_table(&t, "China", "Canada", "Electronics");
        assert_eq!(ca, TariffInfo::new(10.0, "Standard tariff rate"));
    }

    #[test]
    fn demo_sheet_timestamp() {
        let sheet = demo_rate_sheet();
        assert_eq!(sheet.last_updated.to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(sheet.table, demo_tariff_table());
    }
}
