/*!
options.rs - assemble the `OperationOptions` bundle for `run`.

Sources (later wins on key conflicts):
  1. --params-file PATH   JSON, or YAML when the name ends in .yaml / .yml
  2. --params JSON        inline object

Both must decode to a JSON object. Every failure here is an `OptionsError`,
which the result envelope reports as a fatal fault.
*/

use std::path::Path;

use serde_json::Value;

use crate::error::OptionsError;
use crate::processor::OperationOptions;

/// Build the options bundle from the inline string and/or a params file.
pub fn load_options(
    inline: Option<&str>,
    params_file: Option<&Path>,
) -> Result<OperationOptions, OptionsError> {
    let mut options = match params_file {
        Some(path) => load_params_file(path)?,
        None => OperationOptions::new(),
    };

    if let Some(raw) = inline.filter(|s| !s.trim().is_empty()) {
        let value: Value = serde_json::from_str(raw).map_err(OptionsError::Malformed)?;
        options.extend(into_object(value)?);
    }

    Ok(options)
}

fn load_params_file(path: &Path) -> Result<OperationOptions, OptionsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| OptionsError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&raw).map_err(|source| OptionsError::MalformedYaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&raw).map_err(|source| OptionsError::MalformedFile {
            path: path.to_path_buf(),
            source,
        })?
    };

    into_object(value)
}

fn into_object(value: Value) -> Result<OperationOptions, OptionsError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(OptionsError::NotAnObject("null")),
        Value::Bool(_) => Err(OptionsError::NotAnObject("a boolean")),
        Value::Number(_) => Err(OptionsError::NotAnObject("a number")),
        Value::String(_) => Err(OptionsError::NotAnObject("a string")),
        Value::Array(_) => Err(OptionsError::NotAnObject("an array")),
    }
}
