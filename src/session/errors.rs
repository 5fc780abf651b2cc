//! Validation errors shared with every page as the `errors` prop.
//!
//! The host stores per-form validation results in the session under
//! `session.form_info_key`:
//!
//! ```text
//! { "<form name>": { "result": [ { "field": "Email", "value": "Required" }, ... ] } }
//! ```
//!
//! Forms without a result are skipped, as are entries with an empty field or
//! message. A later form's message for the same field wins.

use serde_json::{Map, Value};

use crate::session::store::Session;

/// Flatten session validation results into `{field: message}`.
///
/// With an error bag and at least one error, the map is nested under the bag
/// name. Without a session the result is an empty object.
pub fn resolve_validation_errors(
    session: Option<&Session>,
    form_info_key: &str,
    error_bag: Option<&str>,
) -> Value {
    let mut errors = Map::new();

    let form_info = session.and_then(|s| s.get(form_info_key));
    if let Some(Value::Object(forms)) = form_info {
        for (form_name, data) in forms {
            let results = match data.get("result") {
                Some(Value::Array(results)) if !results.is_empty() => results,
                _ => continue,
            };

            tracing::trace!(form = %form_name, count = results.len(), "Collecting validation errors");

            for error in results {
                let field = error.get("field").and_then(Value::as_str).unwrap_or_default();
                let message = error.get("value").filter(|v| !is_empty_value(v));
                if let (false, Some(message)) = (field.is_empty(), message) {
                    errors.insert(field.to_string(), message.clone());
                }
            }
        }
    }

    match error_bag {
        Some(bag) if !errors.is_empty() => {
            let mut bagged = Map::new();
            bagged.insert(bag.to_string(), Value::Object(errors));
            Value::Object(bagged)
        }
        _ => Value::Object(errors),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}
