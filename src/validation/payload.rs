//! Parses raw JSON bodies into normalized payloads, collecting every field
//! violation instead of stopping at the first one.

use serde_json::{Map, Value};

use super::{ItemError, ValidationError};
use crate::rules::{Mode, RuleKind};

/// A validated add/delete request: values lifted into a list, mode resolved.
#[derive(Debug)]
pub struct RulePayload<V> {
    pub values: Vec<V>,
    pub mode: Mode,
}

/// One kind section of a bulk status update.
#[derive(Debug)]
pub struct KindUpdate {
    pub ids: Vec<i64>,
    pub mode: Mode,
    pub active: bool,
}

/// A validated PUT /rules request. Absent sections stay `None`.
#[derive(Debug, Default)]
pub struct UpdatePayload {
    pub ips: Option<KindUpdate>,
    pub urls: Option<KindUpdate>,
    pub ports: Option<KindUpdate>,
}

/// Validates an add/delete body for rule kind `K`.
///
/// The value field is either `values` or the kind alias (`ip`, `url`, `port`),
/// holding one item or a non-empty list of items. A singular item is lifted
/// into a one-element list so persistence always sees a list. `mode` is
/// required. Any other field is rejected.
pub fn parse_rule_payload<K: RuleKind>(
    body: &Value,
) -> Result<RulePayload<K::Value>, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let Some(obj) = body.as_object() else {
        return Err(vec![body_not_object()]);
    };

    for key in obj.keys() {
        if key != "values" && key != K::KIND && key != "mode" {
            errors.push(unknown_field(key, &["values", K::KIND, "mode"]));
        }
    }

    let raw_values = match (obj.get("values"), obj.get(K::KIND)) {
        (Some(_), Some(_)) => {
            errors.push(
                ItemError::new(
                    "E032",
                    format!("Provide either 'values' or '{}', not both", K::KIND),
                )
                .at(K::KIND),
            );
            None
        }
        (Some(v), None) => Some(("values", v)),
        (None, Some(v)) => Some((K::KIND, v)),
        (None, None) => {
            errors.push(
                ItemError::new("E033", "A value field is required")
                    .suggest(format!("Provide '{}' or 'values'", K::KIND))
                    .at("values"),
            );
            None
        }
    };

    let mut values = Vec::new();
    if let Some((field, raw)) = raw_values {
        match raw {
            Value::Array(items) => {
                if items.is_empty() {
                    errors.push(
                        ItemError::new("E034", "Value list cannot be empty").at(field),
                    );
                }
                for (i, item) in items.iter().enumerate() {
                    match K::parse_item(item) {
                        Ok(v) => values.push(v),
                        Err(e) => errors.push(e.at(format!("{}[{}]", field, i))),
                    }
                }
            }
            single => match K::parse_item(single) {
                Ok(v) => values.push(v),
                Err(e) => errors.push(e.at(field)),
            },
        }
    }

    let mode = parse_mode(obj.get("mode"), "mode", &mut errors);

    match (mode, errors.is_empty()) {
        (Some(mode), true) => Ok(RulePayload { values, mode }),
        _ => Err(errors),
    }
}

/// Validates a PUT /rules body. Each of `ips`, `urls`, `ports` is optional;
/// a section whose `ids` list is absent or empty is skipped, matching the
/// add/delete convention that only named sections participate.
pub fn parse_update_payload(body: &Value) -> Result<UpdatePayload, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let Some(obj) = body.as_object() else {
        return Err(vec![body_not_object()]);
    };

    for key in obj.keys() {
        if key != "ips" && key != "urls" && key != "ports" {
            errors.push(unknown_field(key, &["ips", "urls", "ports"]));
        }
    }

    let payload = UpdatePayload {
        ips: parse_kind_update(obj, "ips", &mut errors),
        urls: parse_kind_update(obj, "urls", &mut errors),
        ports: parse_kind_update(obj, "ports", &mut errors),
    };

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(errors)
    }
}

fn parse_kind_update(
    body: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<KindUpdate> {
    let section = body.get(field)?;

    let Some(obj) = section.as_object() else {
        errors.push(
            ItemError::new("E030", format!("'{}' must be a JSON object", field)).at(field),
        );
        return None;
    };

    for key in obj.keys() {
        if key != "ids" && key != "mode" && key != "active" {
            errors.push(unknown_field(&format!("{}.{}", field, key), &["ids", "mode", "active"]));
        }
    }

    let mut ids = Vec::new();
    match obj.get("ids") {
        // Absent or empty ids mean the section does not participate.
        None => return None,
        Some(Value::Array(items)) => {
            if items.is_empty() {
                return None;
            }
            for (i, item) in items.iter().enumerate() {
                match item.as_i64() {
                    Some(id) => ids.push(id),
                    None => errors.push(
                        ItemError::wrong_type("Rule id", "an integer")
                            .at(format!("{}.ids[{}]", field, i)),
                    ),
                }
            }
        }
        Some(_) => {
            errors.push(
                ItemError::wrong_type("'ids'", "a list of integers")
                    .at(format!("{}.ids", field)),
            );
            return None;
        }
    }

    let mode = parse_mode(obj.get("mode"), &format!("{}.mode", field), errors);

    let active = match obj.get("active") {
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(
                ItemError::wrong_type("'active'", "a boolean").at(format!("{}.active", field)),
            );
            None
        }
        None => {
            errors.push(
                ItemError::new("E033", "'active' is required")
                    .at(format!("{}.active", field)),
            );
            None
        }
    };

    match (mode, active) {
        (Some(mode), Some(active)) => Some(KindUpdate { ids, mode, active }),
        _ => None,
    }
}

fn parse_mode(raw: Option<&Value>, field: &str, errors: &mut Vec<ValidationError>) -> Option<Mode> {
    match raw {
        None => {
            errors.push(
                ItemError::new("E040", "'mode' is required")
                    .suggest("Use 'blacklist' or 'whitelist'")
                    .at(field),
            );
            None
        }
        Some(v) => match v.as_str().and_then(|s| s.parse::<Mode>().ok()) {
            Some(mode) => Some(mode),
            None => {
                errors.push(
                    ItemError::new("E041", format!("Invalid mode: {}", v))
                        .suggest("Use 'blacklist' or 'whitelist'")
                        .at(field),
                );
                None
            }
        },
    }
}

fn body_not_object() -> ValidationError {
    ItemError::new("E030", "Request body must be a JSON object").at("body")
}

fn unknown_field(field: &str, allowed: &[&str]) -> ValidationError {
    ItemError::new("E031", format!("Unknown field '{}'", field))
        .suggest(format!("Allowed fields: {}", allowed.join(", ")))
        .at(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Ip, Port, Url};
    use serde_json::json;

    #[test]
    fn singular_value_is_lifted_into_a_list() {
        let p = parse_rule_payload::<Ip>(&json!({"ip": "10.0.0.1", "mode": "blacklist"}))
            .unwrap();
        assert_eq!(p.values, vec!["10.0.0.1".to_string()]);
        assert_eq!(p.mode, Mode::Blacklist);
    }

    #[test]
    fn values_key_works_for_every_kind() {
        let p = parse_rule_payload::<Url>(
            &json!({"values": ["example.com", "https://a.example.org"], "mode": "whitelist"}),
        )
        .unwrap();
        assert_eq!(p.values.len(), 2);

        let p = parse_rule_payload::<Port>(&json!({"values": [22, 443], "mode": "blacklist"}))
            .unwrap();
        assert_eq!(p.values, vec![22, 443]);
    }

    #[test]
    fn empty_list_is_rejected() {
        let errs =
            parse_rule_payload::<Ip>(&json!({"values": [], "mode": "blacklist"})).unwrap_err();
        assert!(errs.iter().any(|e| e.code == "E034"));
    }

    #[test]
    fn missing_mode_and_bad_item_are_both_reported() {
        let errs = parse_rule_payload::<Ip>(&json!({"values": ["not-an-ip"]})).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().any(|e| e.code == "E007" && e.field == "values[0]"));
        assert!(errs.iter().any(|e| e.code == "E040" && e.field == "mode"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let errs = parse_rule_payload::<Port>(
            &json!({"port": 80, "mode": "blacklist", "reason": "spam"}),
        )
        .unwrap_err();
        assert!(errs.iter().any(|e| e.code == "E031" && e.field == "reason"));
    }

    #[test]
    fn alias_and_values_together_are_rejected() {
        let errs = parse_rule_payload::<Ip>(
            &json!({"ip": "10.0.0.1", "values": ["10.0.0.2"], "mode": "blacklist"}),
        )
        .unwrap_err();
        assert!(errs.iter().any(|e| e.code == "E032"));
    }

    #[test]
    fn out_of_range_port_names_the_item() {
        let errs = parse_rule_payload::<Port>(&json!({"values": [70000], "mode": "blacklist"}))
            .unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, "E021");
        assert_eq!(errs[0].field, "values[0]");
        assert!(errs[0].message.contains("70000"));
    }

    #[test]
    fn update_sections_are_optional() {
        let p = parse_update_payload(&json!({})).unwrap();
        assert!(p.ips.is_none() && p.urls.is_none() && p.ports.is_none());
    }

    #[test]
    fn update_skips_empty_id_lists() {
        let p = parse_update_payload(
            &json!({"ips": {"ids": [], "mode": "blacklist", "active": false}}),
        )
        .unwrap();
        assert!(p.ips.is_none());
    }

    #[test]
    fn update_parses_full_sections() {
        let p = parse_update_payload(&json!({
            "ips": {"ids": [1, 2], "mode": "blacklist", "active": false},
            "ports": {"ids": [7], "mode": "whitelist", "active": true},
        }))
        .unwrap();
        let ips = p.ips.unwrap();
        assert_eq!(ips.ids, vec![1, 2]);
        assert_eq!(ips.mode, Mode::Blacklist);
        assert!(!ips.active);
        assert!(p.urls.is_none());
        assert!(p.ports.is_some());
    }

    #[test]
    fn update_requires_mode_and_active_when_ids_given() {
        let errs = parse_update_payload(&json!({"urls": {"ids": [1]}})).unwrap_err();
        assert!(errs.iter().any(|e| e.field == "urls.mode"));
        assert!(errs.iter().any(|e| e.field == "urls.active"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errs = parse_rule_payload::<Ip>(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errs[0].code, "E030");
        assert!(parse_update_payload(&json!("nope")).is_err());
    }
}
