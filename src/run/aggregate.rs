use crate::error::FieldError;
use crate::form::FormEngine;
use crate::options::{build_args, JobOption};
use crate::value::FormValue;
use ahash::AHashMap;
use futures::future::join_all;
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

/// Validates every `json_schema` sub-form concurrently, all-or-nothing.
///
/// Each form validates independently (fan-out); if any fails, the aggregate
/// fails and reports every failing form's errors with their paths prefixed by
/// the form name (fan-in). Validation never suspends once started, so this is
/// cooperative concurrency, not parallelism, but callers awaiting several
/// sub-forms get them polled together.
pub async fn validate_all(
    forms: &[(&str, &FormEngine)],
) -> Result<AHashMap<String, Value>, Vec<FieldError>> {
    let results = join_all(
        forms
            .iter()
            .map(|(name, engine)| async move { (*name, engine.validate()) }),
    )
    .await;

    let mut values = AHashMap::with_capacity(results.len());
    let mut errors = Vec::new();
    for (name, outcome) in results {
        match outcome {
            Ok(value) => {
                values.insert(name.to_string(), value);
            }
            Err(form_errors) => {
                errors.extend(form_errors.into_iter().map(|e| FieldError {
                    path: prefix_path(name, &e.path),
                    kind: e.kind,
                }));
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        debug!(
            target: "kataform::run",
            forms = %errors.iter().map(|e| e.path.as_str()).join(", "),
            "sub-form validation failed"
        );
        Err(errors)
    }
}

/// Validates all `json_schema` sub-forms and, on success, shapes the full
/// argument map for a run request.
pub async fn collect_args(
    options: &[JobOption],
    raw_values: &AHashMap<String, FormValue>,
    forms: &[(&str, &FormEngine)],
) -> Result<IndexMap<String, Value>, Vec<FieldError>> {
    let subvalues = validate_all(forms).await?;
    Ok(build_args(options, raw_values, &subvalues))
}

fn prefix_path(form: &str, path: &str) -> String {
    if path.is_empty() {
        form.to_string()
    } else {
        format!("{}.{}", form, path)
    }
}
