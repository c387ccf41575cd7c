//! File-level translation
//!
//! A file is translated one line at a time. Each line loses its trailing
//! comment, has its tokens substituted, and gets the comment and the original
//! line terminator back. The result is byte-for-byte identical to the input
//! apart from the substituted tokens.
//!
//! # Example
//!
//! ```ignore
//! use pygyat::Transpiler;
//! use std::path::{Path, PathBuf};
//!
//! let mut transpiler = Transpiler::new();
//! transpiler
//!     .with_prefix("")
//!     .with_output_dir(Some(PathBuf::from("build")));
//! let written = transpiler.transpile_file(Path::new("main.gyat"))?;
//! assert_eq!(written, Path::new("build/main.py"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::error::{GyatError, GyatResult};
use crate::mappings::{Direction, MappingTable};
use crate::naming::{self, DEFAULT_PREFIX};
use crate::sanitizer::{SanitizedLine, sanitize_line};
use crate::substitute::substitute_line;

/// Replacement import names for transpiled modules, keyed by module name
///
/// Used when a transpiled module would shadow a Python standard-library
/// module: `glaze math` then becomes `import gyat_math as math`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRenames(pub Vec<(String, String)>);

impl ImportRenames {
    pub fn new() -> Self {
        ImportRenames(Vec::new())
    }

    /// Add or replace the rename for `module`
    pub fn with_rename(&mut self, module: &str, replacement: &str) -> &mut Self {
        match self.0.iter_mut().find(|(m, _)| m == module) {
            Some(entry) => entry.1 = replacement.to_owned(),
            None => self.0.push((module.to_owned(), replacement.to_owned())),
        }
        self
    }

    pub fn get(&self, module: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(m, _)| m == module)
            .map(|(_, r)| r.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(m, r)| (m.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ImportRenames {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut renames = ImportRenames::new();
        for (module, replacement) in iter {
            renames.with_rename(&module, &replacement);
        }
        renames
    }
}

/// Where and how a file is translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    pub direction: Direction,
    /// Put in front of the derived output name, `"."` by default
    pub prefix: String,
    /// Explicit output path; wins over prefix, directory and derived name
    pub output_name: Option<String>,
    /// Directory for outputs; defaults to the input's directory
    pub output_dir: Option<PathBuf>,
    /// Applied to the translated text, PyGyat → Python only
    pub import_renames: ImportRenames,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        TranspileOptions {
            direction: Direction::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            output_name: None,
            output_dir: None,
            import_renames: ImportRenames::new(),
        }
    }
}

/// Translates files with one mapping table and one set of options
pub struct Transpiler {
    table: MappingTable,
    reversed: OnceCell<MappingTable>,
    options: TranspileOptions,
}

impl Transpiler {
    pub fn new() -> Self {
        Transpiler::with_options(TranspileOptions::default())
    }

    pub fn with_options(options: TranspileOptions) -> Self {
        Transpiler {
            table: MappingTable::default(),
            reversed: OnceCell::new(),
            options,
        }
    }

    /// Use `table` instead of the built-in one. Always given in the
    /// PyGyat → Python orientation; it is inverted for reverse translation.
    pub fn with_table(&mut self, table: MappingTable) -> &mut Self {
        self.table = table;
        self.reversed = OnceCell::new();
        self
    }

    pub fn with_direction(&mut self, direction: Direction) -> &mut Self {
        self.options.direction = direction;
        self
    }

    pub fn with_prefix(&mut self, prefix: &str) -> &mut Self {
        self.options.prefix = prefix.to_string();
        self
    }

    pub fn with_output_name(&mut self, output_name: Option<&str>) -> &mut Self {
        self.options.output_name = output_name.map(str::to_string);
        self
    }

    pub fn with_output_dir(&mut self, output_dir: Option<PathBuf>) -> &mut Self {
        self.options.output_dir = output_dir;
        self
    }

    pub fn with_import_renames(&mut self, renames: ImportRenames) -> &mut Self {
        self.options.import_renames = renames;
        self
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    /// The table for the configured direction
    pub fn active_table(&self) -> GyatResult<&MappingTable> {
        match self.options.direction {
            Direction::GyatToPython => Ok(&self.table),
            Direction::PythonToGyat => self.reversed.get_or_try_init(|| self.table.reversed()),
        }
    }

    pub fn output_path(&self, input: &Path) -> PathBuf {
        naming::output_path(
            self.options.direction,
            input,
            self.options.output_name.as_deref(),
            &self.options.prefix,
            self.options.output_dir.as_deref(),
        )
    }

    /// Translate a whole source text, including the import-rename pass
    pub fn transpile_str(&self, source: &str) -> GyatResult<String> {
        let mut text = transpile_str(source, self.active_table()?);

        let renames = &self.options.import_renames;
        if !renames.is_empty() {
            match self.options.direction {
                Direction::GyatToPython => text = rename_imports(&text, renames),
                Direction::PythonToGyat => {
                    debug!("Ignoring {} import rename(s) in reverse mode", renames.len())
                }
            }
        }
        Ok(text)
    }

    /// Translate `input` and write the result, returning the path written
    ///
    /// The input is read in full before the output is opened, so a missing
    /// or unreadable input never creates or truncates an output file.
    ///
    /// # Errors
    /// - The input cannot be read
    /// - The output cannot be written
    pub fn transpile_file(&self, input: &Path) -> GyatResult<PathBuf> {
        let output = self.output_path(input);
        debug!("Transpiling {} -> {}", input.display(), output.display());

        let source = fs::read_to_string(input).map_err(|e| GyatError::io(input, e))?;
        let text = self.transpile_str(&source)?;
        fs::write(&output, text).map_err(|e| GyatError::io(&output, e))?;

        Ok(output)
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Transpiler::new()
    }
}

/// Translate and write one file with the built-in table
pub fn transpile_file(input: &Path, options: &TranspileOptions) -> GyatResult<PathBuf> {
    Transpiler::with_options(options.clone()).transpile_file(input)
}

/// Translate source text line by line, keeping every line terminator
pub fn transpile_str(source: &str, table: &MappingTable) -> String {
    let mut result = String::with_capacity(source.len());
    for raw in source.split_inclusive('\n') {
        let (line, ending) = split_line_ending(raw);
        result.push_str(&transpile_line(line, table));
        result.push_str(ending);
    }
    result
}

/// Translate a single line given without its terminator
pub fn transpile_line(line: &str, table: &MappingTable) -> String {
    let SanitizedLine { code, comment } = sanitize_line(line);
    if code.trim().is_empty() {
        return line.to_string();
    }
    let mut translated = substitute_line(code, table);
    translated.push_str(comment);
    translated
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    let body = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw);
    (body, &raw[body.len()..])
}

/// Point imports of renamed modules at their replacements
///
/// For every `module → replacement` pair:
///
/// - `import module`, at the start of a statement, becomes
///   `import replacement as module`
/// - `import module as alias` becomes `import replacement as alias`
/// - `from module import` becomes `from replacement import`
///
/// This is plain text substitution. Imports written any other way are left
/// alone.
pub fn rename_imports(text: &str, renames: &ImportRenames) -> String {
    let mut result = text.to_string();

    for (module, replacement) in renames.iter() {
        let escaped = regex::escape(module);
        let patterns = (
            Regex::new(&format!(
                r"(?m)(^|;)([ \t]*)import(\s+){}\b(\s+as\s+\w+)?",
                escaped
            )),
            Regex::new(&format!(r"\bfrom(\s+){}(\s+import)\b", escaped)),
        );
        let (import_re, from_re) = match patterns {
            (Ok(import_re), Ok(from_re)) => (import_re, from_re),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping import rename for '{}': {}", module, e);
                continue;
            }
        };

        let renamed = import_re
            .replace_all(&result, |caps: &Captures| {
                let end = caps.get(0).map_or(0, |m| m.end());
                // `import module.sub` names a different module
                if result[end..].starts_with('.') {
                    return caps[0].to_string();
                }
                let head = format!("{}{}import{}", &caps[1], &caps[2], &caps[3]);
                match caps.get(4) {
                    Some(alias) => format!("{}{}{}", head, replacement, alias.as_str()),
                    None => format!("{}{} as {}", head, replacement, module),
                }
            })
            .into_owned();
        let renamed = from_re
            .replace_all(&renamed, |caps: &Captures| {
                format!("from{}{}{}", &caps[1], replacement, &caps[2])
            })
            .into_owned();

        if renamed != result {
            debug!("Renamed imports of '{}' to '{}'", module, replacement);
        }
        result = renamed;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(source: &str) -> String {
        transpile_str(source, MappingTable::default_table())
    }

    #[test]
    fn test_comment_is_reattached() {
        assert_eq!(
            transpile_line("chat is this real x twin 1  # check", MappingTable::default_table()),
            "if x == 1  # check"
        );
    }

    #[test]
    fn test_comment_text_is_never_translated() {
        assert_eq!(
            translate("yap(x)  # yap is print, hawk is try\n"),
            "print(x)  # yap is print, hawk is try\n"
        );
        assert_eq!(translate("# glaze everything\n"), "# glaze everything\n");
    }

    #[test]
    fn test_lines_without_tokens_are_identical() {
        let source = "x = 1\n\n    \ny = [a, b]\t\n";
        assert_eq!(translate(source), source);
    }

    #[test]
    fn test_line_endings_are_preserved() {
        assert_eq!(translate("yap(1)\r\nyap(2)"), "print(1)\r\nprint(2)");
        assert_eq!(translate("yap(1)\n"), "print(1)\n");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_whole_program() {
        let source = "\
glaze math

skibidi Counter:
    bop __init__(unc):
        unc.count = 0  # start at zero

    bop bump(unc, n):
        chat is this real n sigma 0:
            unc.count rizz n
        yo chat n twin 0:
            its giving NPC
        only in ohio:
            crashout ValueError(\"n beta 0\")
        its giving unc.count
";
        let expected = "\
import math

class Counter:
    def __init__(self):
        self.count = 0  # start at zero

    def bump(self, n):
        if n > 0:
            self.count += n
        elif n == 0:
            return None
        else:
            raise ValueError(\"n beta 0\")
        return self.count
";
        assert_eq!(translate(source), expected);
    }

    #[test]
    fn test_rename_direct_imports() {
        let mut renames = ImportRenames::new();
        renames.with_rename("math", "gyat_math");

        assert_eq!(
            rename_imports("import math\n", &renames),
            "import gyat_math as math\n"
        );
        assert_eq!(
            rename_imports("import math as m\n", &renames),
            "import gyat_math as m\n"
        );
    }

    #[test]
    fn test_rename_from_imports() {
        let mut renames = ImportRenames::new();
        renames.with_rename("random", "gyat_random");
        assert_eq!(
            rename_imports("from random import choice\n", &renames),
            "from gyat_random import choice\n"
        );
    }

    #[test]
    fn test_rename_leaves_other_modules_alone() {
        let mut renames = ImportRenames::new();
        renames.with_rename("math", "gyat_math");

        let text = "import mathematics\nimport math.special\nfrom mathx import y\n";
        assert_eq!(rename_imports(text, &renames), text);
    }

    #[test]
    fn test_rename_skips_names_imported_from_other_modules() {
        let mut renames = ImportRenames::new();
        renames.with_rename("math", "gyat_math");

        let text = "from pkg import math\nx = 1  # import math later\n";
        assert_eq!(rename_imports(text, &renames), text);
        assert_eq!(
            rename_imports("    import math\nx = 1; import math\n", &renames),
            "    import gyat_math as math\nx = 1; import gyat_math as math\n"
        );
    }

    #[test]
    fn test_import_renames_builder() {
        let mut renames = ImportRenames::new();
        renames
            .with_rename("math", "gyat_math")
            .with_rename("math", "brainrot_math");
        assert_eq!(renames.len(), 1);
        assert_eq!(renames.get("math"), Some("brainrot_math"));
        assert_eq!(renames.get("os"), None);
    }

    #[test]
    fn test_transpiler_applies_renames_after_translation() {
        let mut renames = ImportRenames::new();
        renames.with_rename("random", "gyat_random");
        let mut transpiler = Transpiler::new();
        transpiler.with_import_renames(renames);

        assert_eq!(
            transpiler
                .transpile_str("glaze random\nlock in random glaze choice\n")
                .unwrap(),
            "import gyat_random as random\nfrom gyat_random import choice\n"
        );
    }

    #[test]
    fn test_transpiler_reverse_direction() {
        let mut transpiler = Transpiler::new();
        transpiler.with_direction(Direction::PythonToGyat);

        assert_eq!(
            transpiler
                .transpile_str("for i in range(3):\n    print(i)  # loop\n")
                .unwrap(),
            "mewing i in huzz(3):\n    yap(i)  # loop\n"
        );
    }

    #[test]
    fn test_transpiler_custom_table() {
        let table = MappingTable::default_table()
            .with_extensions(vec![("pluh".to_string(), "pass".to_string())])
            .unwrap();
        let mut transpiler = Transpiler::new();
        transpiler.with_table(table);

        assert_eq!(
            transpiler.transpile_str("bop f():\n    pluh\n").unwrap(),
            "def f():\n    pass\n"
        );
    }

    #[test]
    fn test_extension_phrase_wins_over_its_words() {
        let table = MappingTable::default_table()
            .with_extensions(vec![
                ("sigma male".to_string(), "boss".to_string()),
                ("zz".to_string(), "b".to_string()),
                ("zz top".to_string(), "a".to_string()),
            ])
            .unwrap();

        assert_eq!(transpile_str("x = sigma male\n", &table), "x = boss\n");
        assert_eq!(transpile_str("x sigma 1\n", &table), "x > 1\n");
        assert_eq!(transpile_str("zz top\nzz\n", &table), "a\nb\n");
    }

    #[test]
    fn test_default_options() {
        let transpiler = Transpiler::default();
        assert_eq!(transpiler.options().prefix, ".");
        assert_eq!(transpiler.options().direction, Direction::GyatToPython);
        assert_eq!(
            transpiler.output_path(Path::new("dir/app.gyat")),
            PathBuf::from("dir/.app.py")
        );
    }
}
