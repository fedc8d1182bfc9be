//! Masking of card data before it reaches a log line.

use crate::domain::payment::mask_pan;
use serde_json::Value;

fn is_pan_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k == "number" || k == "pan" || k.contains("card[number]") || k.contains("cardnumber")
}

fn is_secret_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("cvc") || k.contains("cvv") || k.contains("client_secret") || k == "clientsecret"
}

/// Masks form-encoded request parameters.
pub fn secure_form(params: &[(&str, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let value = if is_pan_key(key) {
                mask_pan(value)
            } else if is_secret_key(key) {
                "***".to_string()
            } else {
                value.clone()
            };
            (key.to_string(), value)
        })
        .collect()
}

/// Masks a JSON payload recursively.
pub fn secure_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let new_val = match val {
                    Value::String(s) if is_pan_key(k) => Value::String(mask_pan(s)),
                    Value::String(_) if is_secret_key(k) => Value::String("***".to_string()),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secure_form_hides_card_data() {
        let params = [
            ("type", "card".to_string()),
            ("card[number]", "4000000000000002".to_string()),
            ("card[cvc]", "314".to_string()),
            ("billing_details[name]", "Ada".to_string()),
        ];
        let secured = secure_form(&params);
        assert_eq!(secured[0].1, "card");
        assert_eq!(secured[1].1, "************0002");
        assert_eq!(secured[2].1, "***");
        assert_eq!(secured[3].1, "Ada");
    }

    #[test]
    fn test_secure_value_nested() {
        let value = json!({
            "clientSecret": "pi_1_secret_2",
            "card": { "number": "4242424242424242", "brand": "visa" },
            "items": [{ "cvc": "999" }]
        });
        let secured = secure_value(&value);
        assert_eq!(secured["clientSecret"], "***");
        assert_eq!(secured["card"]["number"], "************4242");
        assert_eq!(secured["card"]["brand"], "visa");
        assert_eq!(secured["items"][0]["cvc"], "***");
    }
}
