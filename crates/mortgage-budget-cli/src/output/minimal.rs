use serde_json::Value;

use super::{result_of, scalar_text};

/// Fields printed by `--output minimal`, most specific first.
const HEADLINE_FIELDS: [&str; 2] = ["monthly_total", "monthly_payment"];

/// Print only the headline figure: the total monthly housing cost for a
/// budget, the monthly payment for a loan.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in HEADLINE_FIELDS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", scalar_text(val));
                return;
            }
        }
    }

    println!("{}", scalar_text(result));
}
