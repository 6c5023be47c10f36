use std::collections::HashMap;

use serde_json::Value;

use super::fields::FieldIndex;
use super::language::LanguageResolution;

/// Field display name → schema storage key, scoped to a single language.
pub type NameToKeyMap = HashMap<String, String>;

/// Collect the name → key mappings for every field resolved to `language`.
///
/// Derived on demand per language and never cached across languages. Display
/// names are expected to be unique within a language; if two fields share
/// one, the field with the highest id wins. Fields are visited in ascending
/// id order so the outcome does not depend on map iteration order.
pub fn name_to_key_map(
    fields: &FieldIndex,
    resolution: &LanguageResolution,
    language: &str,
) -> NameToKeyMap {
    let mut field_ids: Vec<_> = fields.keys().copied().collect();
    field_ids.sort_unstable();

    let mut names = NameToKeyMap::new();

    for field_id in field_ids {
        if resolution.language_of(field_id) == Some(language) {
            let field = &fields[&field_id];
            names.insert(field.name.clone(), field.key.clone());
        }
    }

    names
}

/// Rewrite a survey section's keys to schema storage keys.
///
/// Arrays keep their element order, objects are rebuilt entry by entry with
/// recognized names replaced by their storage keys, and scalars pass through
/// untouched. Unrecognized keys are kept as-is so host-side extras survive
/// the rewrite; their nested values are still rewritten. Sequential-vs-keyed
/// is decided by the `Value` variant alone: an object stays keyed even when
/// all its keys look numeric.
pub fn map_section(section: &Value, names: &NameToKeyMap) -> Value {
    match section {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| map_section(item, names)).collect())
        }
        Value::Object(entries) => {
            let mut mapped = serde_json::Map::with_capacity(entries.len());
            for (key, item) in entries {
                let mapped_key = names.get(key).unwrap_or(key);
                mapped.insert(mapped_key.clone(), map_section(item, names));
            }
            Value::Object(mapped)
        }
        scalar => scalar.clone(),
    }
}
