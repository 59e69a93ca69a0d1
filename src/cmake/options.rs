use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::Error;

/// Extra `-D` definitions, keyed by definition name.
pub type CMakeOptionMap = BTreeMap<String, String>;

/// Reads a JSON object of definitions, e.g. `{"gtest_force_shared_crt": "ON"}`.
///
/// An empty path or a missing file yields an empty map.
pub fn load_cmake_options(path: &Path) -> Result<CMakeOptionMap, Error> {
    if path.as_os_str().is_empty() || !path.is_file() {
        log::debug!("No CMake options file at {:?}", path);
        return Ok(CMakeOptionMap::new());
    }

    let content = fs::read_to_string(path)?;
    parse_cmake_options(&content)
        .map_err(|msg| Error::OptionsParse(format!("{:?}: {}", path, msg)))
}

fn parse_cmake_options(content: &str) -> Result<CMakeOptionMap, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let Value::Object(entries) = value else {
        return Err("expected a JSON object of name/value pairs".to_string());
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(format!("value of '{}' must be a string, got {}", key, other)),
            };
            Ok((key, rendered))
        })
        .collect()
}
