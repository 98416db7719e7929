use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::{result_of, scalar_text};

/// Print the result as a Field/Value table, followed by any warnings and
/// the methodology line.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.as_str(), &display_value(key, val)]);
            }
            println!("{}", Table::from(builder));
        }
        other => println!("{}", scalar_text(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Currency to cents, the ratio to one decimal with a percent sign; rates,
/// fractions and terms unchanged.
fn display_value(key: &str, value: &Value) -> String {
    let text = scalar_text(value);
    let Ok(amount) = Decimal::from_str(&text) else {
        return if value.is_null() { "n/a".to_string() } else { text };
    };

    match key {
        "expense_to_income_ratio_percent" => format!("{}%", amount.round_dp(1)),
        k if is_unscaled(k) => text,
        _ => format!("{:.2}", amount.round_dp(2)),
    }
}

fn is_unscaled(key: &str) -> bool {
    key.ends_with("_rate") || key == "percent_down" || key == "term_years" || key == "periods"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_rounded_to_cents() {
        assert_eq!(display_value("monthly_payment", &json!("3459.7349216893")), "3459.73");
        assert_eq!(display_value("loan_amount", &json!("800000")), "800000.00");
    }

    #[test]
    fn test_rates_and_terms_untouched() {
        assert_eq!(display_value("annual_rate", &json!("0.032")), "0.032");
        assert_eq!(display_value("percent_down", &json!("0.20")), "0.20");
        assert_eq!(display_value("periods", &json!(360)), "360");
    }

    #[test]
    fn test_ratio_and_missing_values() {
        assert_eq!(display_value("expense_to_income_ratio_percent", &json!("52.5168")), "52.5%");
        assert_eq!(display_value("expense_to_income_ratio_percent", &Value::Null), "n/a");
        assert_eq!(display_value("affordability", &json!("above_guideline")), "above_guideline");
    }
}
