//! Calculator form input
//!
//! Raw string fields as entered by the user, the presence check run before
//! calculating, and the lenient number parsing that turns them into
//! [`DutyValueInputs`].

use crate::domain::{DomainError, DomainResult, DutyValueInputs};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorFormData {
    pub product_name: String,
    pub product_cost: String,
    pub hs_code: String,
    pub product_category: String,

    pub origin_country: String,
    pub destination_country: String,

    pub shipping_method: String,
    pub shipping_cost: String,
    pub insurance_cost: String,

    pub quantity: String,
    pub unit_weight: String,

    pub additional_fees: String,
}

impl CalculatorFormData {
    /// Names of required fields left empty, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let required: [(&'static str, &str); 7] = [
            ("productName", self.product_name.as_str()),
            ("productCost", self.product_cost.as_str()),
            ("quantity", self.quantity.as_str()),
            ("originCountry", self.origin_country.as_str()),
            ("destinationCountry", self.destination_country.as_str()),
            ("productCategory", self.product_category.as_str()),
            ("shippingCost", self.shipping_cost.as_str()),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn validate_required(&self) -> DomainResult<()> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingFields(missing))
        }
    }

    /// Convert to calculation inputs. Unparsable or zero amounts become 0,
    /// an unparsable or zero quantity becomes 1.
    pub fn parse(&self) -> DutyValueInputs {
        DutyValueInputs {
            product_cost: parse_amount(&self.product_cost),
            shipping_cost: parse_amount(&self.shipping_cost),
            insurance_cost: parse_amount(&self.insurance_cost),
            additional_fees: parse_amount(&self.additional_fees),
            quantity: parse_quantity(&self.quantity),
            unit_weight: parse_amount(&self.unit_weight),
            origin_country: self.origin_country.clone(),
            destination_country: self.destination_country.clone(),
            product_category: self.product_category.clone(),
            hs_code: if self.hs_code.is_empty() {
                None
            } else {
                Some(self.hs_code.clone())
            },
        }
    }
}

fn parse_amount(raw: &str) -> f64 {
    match parse_float_prefix(raw) {
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}

fn parse_quantity(raw: &str) -> i64 {
    match parse_int_prefix(raw) {
        Some(v) if v != 0 => v,
        _ => 1,
    }
}

/// Parse the longest leading decimal literal, ignoring trailing text.
///
/// `"12.5kg"` → 12.5, `"  -3e2x"` → -300, `".5"` → 0.5, `"abc"` → None.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse the longest leading integer, ignoring trailing text.
///
/// `"12"` → 12, `"2.9"` → 2, `"0x1A"` → 26, `"-4 boxes"` → -4.
/// Saturates at the `i64` bounds.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value
            .saturating_mul(radix as i64)
            .saturating_add(d as i64);
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CalculatorFormData {
        CalculatorFormData {
            product_name: "Wireless Headphones".into(),
            product_cost: "100".into(),
            hs_code: String::new(),
            product_category: "Electronics".into(),
            origin_country: "China".into(),
            destination_country: "United States".into(),
            shipping_method: "Air Freight".into(),
            shipping_cost: "50".into(),
            insurance_cost: "10".into(),
            quantity: "1".into(),
            unit_weight: "0.25".into(),
            additional_fees: "5".into(),
        }
    }

    #[test]
    fn complete_form_passes_presence_check() {
        assert!(filled().missing_required_fields().is_empty());
        assert!(filled().validate_required().is_ok());
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let form = CalculatorFormData {
            hs_code: String::new(),
            shipping_method: String::new(),
            insurance_cost: String::new(),
            unit_weight: String::new(),
            additional_fees: String::new(),
            ..filled()
        };
        assert!(form.validate_required().is_ok());
    }

    #[test]
    fn missing_fields_listed_in_form_order() {
        let form = CalculatorFormData {
            product_name: String::new(),
            shipping_cost: String::new(),
            quantity: String::new(),
            ..filled()
        };
        assert_eq!(
            form.missing_required_fields(),
            vec!["productName", "quantity", "shippingCost"]
        );
        assert_eq!(
            form.validate_required(),
            Err(DomainError::MissingFields(vec![
                "productName",
                "quantity",
                "shippingCost"
            ]))
        );
    }

    #[test]
    fn presence_check_does_not_judge_content() {
        let form = CalculatorFormData {
            product_cost: "abc".into(),
            quantity: "-5".into(),
            ..filled()
        };
        assert!(form.validate_required().is_ok());
    }

    #[test]
    fn parse_complete_form() {
        let inputs = filled().parse();
        assert_eq!(inputs.product_cost, 100.0);
        assert_eq!(inputs.shipping_cost, 50.0);
        assert_eq!(inputs.insurance_cost, 10.0);
        assert_eq!(inputs.additional_fees, 5.0);
        assert_eq!(inputs.quantity, 1);
        assert_eq!(inputs.unit_weight, 0.25);
        assert_eq!(inputs.origin_country, "China");
        assert_eq!(inputs.hs_code, None);
    }

    #[test]
    fn parse_falls_back_on_garbage() {
        let form = CalculatorFormData {
            product_cost: "n/a".into(),
            insurance_cost: String::new(),
            quantity: "lots".into(),
            hs_code: "8518.30.00".into(),
            ..filled()
        };
        let inputs = form.parse();
        assert_eq!(inputs.product_cost, 0.0);
        assert_eq!(inputs.insurance_cost, 0.0);
        assert_eq!(inputs.quantity, 1);
        assert_eq!(inputs.hs_code.as_deref(), Some("8518.30.00"));
    }

    #[test]
    fn zero_quantity_becomes_one() {
        let form = CalculatorFormData {
            quantity: "0".into(),
            ..filled()
        };
        assert_eq!(form.parse().quantity, 1);
    }

    #[test]
    fn negative_values_pass_through() {
        let form = CalculatorFormData {
            product_cost: "-12.5".into(),
            quantity: "-3".into(),
            ..filled()
        };
        let inputs = form.parse();
        assert_eq!(inputs.product_cost, -12.5);
        assert_eq!(inputs.quantity, -3);
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float_prefix("12.5kg"), Some(12.5));
        assert_eq!(parse_float_prefix("  -3e2x"), Some(-300.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
        assert_eq!(parse_float_prefix("+7"), Some(7.0));
        assert_eq!(parse_float_prefix("1,000"), Some(1.0));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("12"), Some(12));
        assert_eq!(parse_int_prefix("2.9"), Some(2));
        assert_eq!(parse_int_prefix("  42 boxes"), Some(42));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("0x1A"), Some(26));
        assert_eq!(parse_int_prefix("1e3"), Some(1));
        assert_eq!(parse_int_prefix(".5"), None);
        assert_eq!(parse_int_prefix("0x"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }
}
