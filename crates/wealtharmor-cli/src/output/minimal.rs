use serde_json::Value;

/// Headline fields per command, first match wins. Dotted paths reach into
/// nested records (`tier.label` for a classification).
const PRIORITY_PATHS: [&str; 9] = [
    "tier.label",
    "tax_amount",
    "final_amount",
    "shocked_value",
    "converted",
    "metrics.total",
    "label",
    "rate",
    "total",
];

/// Print just the headline value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(_) => {
            for path in PRIORITY_PATHS {
                if let Some(val) = lookup(result_obj, path) {
                    if !val.is_null() {
                        return format_minimal(val);
                    }
                }
            }
            match result_obj.as_object().and_then(|m| m.iter().next()) {
                Some((key, val)) => format!("{}: {}", key, format_minimal(val)),
                None => String::new(),
            }
        }
        // Ranked lists: the headline is the first entry
        Value::Array(items) => items.first().map(minimal_line).unwrap_or_default(),
        other => format_minimal(other),
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_tier_label() {
        let v = json!({"result": {"amount": "75000", "tier": {"label": "Fortified"}}});
        assert_eq!(minimal_line(&v), "Fortified");
    }

    #[test]
    fn test_portfolio_total() {
        let v = json!({"result": {"metrics": {"total": "100000"}, "briefing": {"label": "Fortified"}}});
        assert_eq!(minimal_line(&v), "100000");
    }

    #[test]
    fn test_ranked_list_uses_first_entry() {
        let v = json!({"result": [{"id": "a", "final_amount": "9"}, {"id": "b", "final_amount": "5"}]});
        assert_eq!(minimal_line(&v), "9");
    }

    #[test]
    fn test_fallback_to_first_field() {
        let v = json!({"result": {"zeta": 1}});
        assert_eq!(minimal_line(&v), "zeta: 1");
    }
}
