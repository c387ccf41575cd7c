//! Output file naming
//!
//! `foo.gyat` becomes `foo.py`. Anything else just gets `.py` appended; no
//! other suffix is ever stripped.

use std::path::{Path, PathBuf};

use crate::mappings::Direction;

/// Prefix the driver puts on generated files unless told otherwise
pub const DEFAULT_PREFIX: &str = ".";

/// Derive the output file name for a PyGyat source
///
/// # Arguments
/// * `input` - Base name of the source file
/// * `override_name` - Explicit output name, returned verbatim when given
///
/// # Example
/// ```ignore
/// assert_eq!(output_name("foo.gyat", None), "foo.py");
/// assert_eq!(output_name("foo", None), "foo.py");
/// assert_eq!(output_name("foo.gyat", Some("bar.py")), "bar.py");
/// ```
pub fn output_name(input: &str, override_name: Option<&str>) -> String {
    output_name_for(Direction::GyatToPython, input, override_name)
}

/// Same as [`output_name`], with the extensions chosen by `direction`
pub fn output_name_for(direction: Direction, input: &str, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_string();
    }
    let target = direction.target_extension();
    match input.strip_suffix(direction.source_extension()) {
        Some(stem) => format!("{}{}", stem, target),
        None => format!("{}{}", input, target),
    }
}

/// Full path the transpiled file is written to
///
/// An override is used as the whole path, without prefix or directory.
/// Otherwise the file lands in `output_dir`, or next to the input, named
/// `prefix + output_name(basename)`.
pub fn output_path(
    direction: Direction,
    input: &Path,
    override_name: Option<&str>,
    prefix: &str,
    output_dir: Option<&Path>,
) -> PathBuf {
    if let Some(name) = override_name {
        return PathBuf::from(name);
    }

    let basename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}", prefix, output_name_for(direction, &basename, None));

    match output_dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
