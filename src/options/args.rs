use super::{JobOption, OptionType};
use crate::value::FormValue;
use ahash::AHashMap;
use indexmap::IndexMap;
use serde_json::Value;

/// Shapes the collected parameter values into the argument map a run request
/// carries.
///
/// This is a pure value-shaping pass and is total: it never fails and never
/// checks required-ness (the presenting form enforced that before collection).
/// Per option, in declaration order:
///
/// - absent, null and empty-string values are skipped;
/// - empty arrays are skipped too; an empty multi-value selection is "not
///   provided" here, even though the form engine itself accepts an empty array
///   for a required array field (the two layers diverge on purpose);
/// - date-shaped edit values coerce to `"YYYY-MM-DD"`;
/// - `json_schema` options are sourced from `json_schema_subvalues` (the form
///   engine's validated output for that option name) and merged last, so they
///   overwrite an incidental same-named raw entry;
/// - credential and file values pass through untouched.
pub fn build_args(
    options: &[JobOption],
    raw_values: &AHashMap<String, FormValue>,
    json_schema_subvalues: &AHashMap<String, Value>,
) -> IndexMap<String, Value> {
    let mut args = IndexMap::new();
    let mut schema_entries: Vec<(String, Value)> = Vec::new();

    for option in options {
        match option.option_type {
            OptionType::JsonSchema => {
                if let Some(sub) = json_schema_subvalues.get(&option.name) {
                    if !sub.is_null() {
                        schema_entries.push((option.name.clone(), sub.clone()));
                    }
                }
            }
            OptionType::Text
            | OptionType::Date
            | OptionType::Number
            | OptionType::File
            | OptionType::Credential => {
                let Some(value) = raw_values.get(&option.name) else {
                    continue;
                };
                if value.is_absent() {
                    continue;
                }
                if matches!(value, FormValue::Array(items) if items.is_empty()) {
                    continue;
                }
                // `to_wire` already renders Date leaves as "YYYY-MM-DD".
                args.insert(option.name.clone(), value.to_wire());
            }
        }
    }

    // Sub-form output merges last so it wins over an incidental same-named
    // raw entry.
    for (name, value) in schema_entries {
        args.insert(name, value);
    }

    args
}
