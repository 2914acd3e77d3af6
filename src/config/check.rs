use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Compare a config file with the built-in defaults and return the dotted
/// keys the file does not define (e.g. `crm.batch_size`).
///
/// Missing keys are not an error: serde fills them with defaults at load
/// time. This only tells the user what an old file silently inherits.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let on_disk: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let defaults =
        serde_yaml::to_value(Config::default()).map_err(|e| AppError::Config(e.to_string()))?;

    let mut out = Vec::new();
    if let (Some(expected), Some(actual)) = (defaults.as_mapping(), on_disk.as_mapping()) {
        collect_missing("", expected, actual, &mut out);
    } else if let Some(expected) = defaults.as_mapping() {
        // empty or non-mapping file: everything is missing
        collect_missing("", expected, &Mapping::new(), &mut out);
    }
    Ok(out)
}

fn collect_missing(prefix: &str, expected: &Mapping, actual: &Mapping, out: &mut Vec<String>) {
    for (key, value) in expected {
        let Some(name) = key.as_str() else { continue };
        let dotted = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match (value.as_mapping(), actual.get(key)) {
            (_, None) => out.push(dotted),
            (Some(sub_expected), Some(sub_actual)) => {
                let empty = Mapping::new();
                let sub_actual = sub_actual.as_mapping().unwrap_or(&empty);
                collect_missing(&dotted, sub_expected, sub_actual, out);
            }
            (None, Some(_)) => {}
        }
    }
}
