use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline figure per command, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "monthly_installment",
    "interest_savings",
    "interestSavings",
    "monthlyInstallment",
    "suggestion",
    "response",
    "total_interest",
    "future_value",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", scalar_text(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
