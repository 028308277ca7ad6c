//! Normalization of raw character documents before they are stored.
//!
//! The service returns grouped arrays in no stable order, so two fetches of
//! an unchanged character can differ textually. Sorting the noisy arrays by
//! id and dropping the `providedFrom` block makes snapshots diffable.

use std::cmp::Ordering;

use serde_json::Value;

/// Groups whose arrays are sorted by string id.
const STRING_ID_GROUPS: [&str; 3] = ["modifiers", "options", "choices"];
/// Action groups sorted by numeric id.
const NUMERIC_ACTION_GROUPS: [&str; 2] = ["spells", "class"];

/// Return a normalized copy of a raw character document.
pub fn normalize(mut doc: Value) -> Value {
    if let Some(root) = doc.as_object_mut() {
        normalize_root(root);
    }
    doc
}

fn normalize_root(root: &mut serde_json::Map<String, Value>) {
    root.shift_remove("providedFrom");

    for group in STRING_ID_GROUPS {
        if let Some(Value::Object(map)) = root.get_mut(group) {
            for entries in map.values_mut() {
                if let Value::Array(items) = entries {
                    items.sort_by(|a, b| id_text(a).cmp(&id_text(b)));
                }
            }
        }
    }

    if let Some(Value::Object(actions)) = root.get_mut("actions") {
        for group in NUMERIC_ACTION_GROUPS {
            if let Some(Value::Array(items)) = actions.get_mut(group) {
                items.sort_by(|a, b| compare_ids(a.get("id"), b.get("id")));
            }
        }
    }

    if let Some(Value::Array(class_spells)) = root.get_mut("classSpells") {
        for class in class_spells {
            if let Some(Value::Array(spells)) = class.get_mut("spells") {
                spells.sort_by(|a, b| {
                    compare_ids(a.pointer("/definition/id"), b.pointer("/definition/id"))
                });
            }
        }
    }

    if let Some(Value::Array(inventory)) = root.get_mut("inventory") {
        for item in inventory.iter_mut() {
            if let Some(Value::Array(granted)) = item.pointer_mut("/definition/grantedModifiers") {
                granted.sort_by(|a, b| compare_ids(a.get("id"), b.get("id")));
            }
        }
        inventory.sort_by(|a, b| compare_ids(a.get("id"), b.get("id")));
    }
}

fn id_text(entry: &Value) -> String {
    text(entry.get("id"))
}

/// Numeric ids compare numerically; anything else falls back to text.
fn compare_ids(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => text(a).cmp(&text(b)),
    }
}

fn text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
