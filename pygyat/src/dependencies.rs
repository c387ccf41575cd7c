//! Discovery of imported PyGyat modules
//!
//! Two import shapes are recognized:
//!
//! - `glaze module` (followed by `;`, whitespace or the end of the text)
//! - `lock in module glaze ...`
//!
//! Every module name found is returned with `.gyat` appended, which is the
//! file name the module would have if it is itself a PyGyat source. Whether
//! such a file exists is for the caller to find out.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{GyatError, GyatResult};
use crate::mappings::DIALECT_EXTENSION;

static DIRECT_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bglaze\s([\w.]+)(?:;|\s|$)").expect("direct import regex"));

static FROM_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\block in\s([\w.]+)\s+glaze\b").expect("from import regex"));

/// Extract imported module file names from PyGyat source text
///
/// Direct imports come first, in text order, followed by from-imports.
/// Duplicates are kept: a module imported both ways is listed twice.
///
/// # Example
/// ```ignore
/// let deps = extract_dependencies_from_str("lock in pkg glaze sub");
/// assert_eq!(deps, vec!["sub.gyat", "pkg.gyat"]);
/// ```
pub fn extract_dependencies_from_str(source: &str) -> Vec<String> {
    let direct = DIRECT_IMPORT_RE.captures_iter(source);
    let from = FROM_IMPORT_RE.captures_iter(source);

    direct
        .chain(from)
        .filter_map(|caps| caps.get(1))
        .map(|module| format!("{}{}", module.as_str(), DIALECT_EXTENSION))
        .collect()
}

/// Read a PyGyat file and extract its imported module file names
///
/// # Errors
/// - The file cannot be read
pub fn extract_dependencies(path: &Path) -> GyatResult<Vec<String>> {
    let source = fs::read_to_string(path).map_err(|e| GyatError::io(path, e))?;
    let dependencies = extract_dependencies_from_str(&source);
    debug!(
        "{} imports {} module(s): {:?}",
        path.display(),
        dependencies.len(),
        dependencies
    );
    Ok(dependencies)
}
