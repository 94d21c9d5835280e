use serde_json::Value;

/// Key answer fields, in order of priority. `summary` objects are searched
/// as well as the result itself.
const PRIORITY_KEYS: [&str; 4] = ["payment", "total_interest", "payoff_date", "interest_saved"];

/// Print just the key answer value from the output.
///
/// Scenario comparisons print one `name: interest_saved` line each.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(comparisons)) = result_obj.get("comparisons") {
        for cmp in comparisons {
            let name = cmp.get("name").map(format_minimal).unwrap_or_default();
            let saved = cmp
                .get("interest_saved")
                .map(format_minimal)
                .unwrap_or_default();
            println!("{}: {}", name, saved);
        }
        return;
    }

    let summary = result_obj.get("summary");
    for key in &PRIORITY_KEYS {
        let found = result_obj
            .get(*key)
            .or_else(|| summary.and_then(|s| s.get(*key)));
        if let Some(val) = found.filter(|v| !v.is_null()) {
            println!("{}", format_minimal(val));
            return;
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
