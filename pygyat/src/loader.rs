use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{GyatError, GyatResult};
use crate::transpiler::ImportRenames;

/// Load an import-rename map from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "math": "gyat_math",
///     "random": "gyat_random"
/// }
/// ```
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON, or a root that is not an object
pub fn load_import_renames(path: &Path) -> GyatResult<ImportRenames> {
    Ok(load_string_pairs(path)?.into_iter().collect())
}

/// Load extra keyword mappings (PyGyat phrase → Python) from a JSON file
///
/// Same format as [`load_import_renames`]. Pairs come back in file order.
pub fn load_keyword_table(path: &Path) -> GyatResult<Vec<(String, String)>> {
    load_string_pairs(path)
}

fn load_string_pairs(path: &Path) -> GyatResult<Vec<(String, String)>> {
    let content = fs::read_to_string(path).map_err(|e| GyatError::io(path, e))?;

    let json: Value = serde_json::from_str(&content).map_err(|e| {
        GyatError::Config(format!(
            "Failed to parse JSON from '{}': {}",
            path.display(),
            e
        ))
    })?;

    let obj = json.as_object().ok_or_else(|| {
        GyatError::Config(format!(
            "Invalid JSON in '{}': root must be an object",
            path.display()
        ))
    })?;

    let mut pairs = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }
        match value.as_str() {
            Some(text) => pairs.push((key.clone(), text.to_string())),
            None => warn!(
                "Value for '{}' in {} is not a string, skipping",
                key,
                path.display()
            ),
        }
    }

    Ok(pairs)
}
