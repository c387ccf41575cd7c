//! PyGyat → Python transpiler
//!
//! PyGyat is Python with its keywords swapped for slang (`yap` for `print`,
//! `chat is this real` for `if`, `twin` for `==`). Translation is purely
//! textual and line oriented: each line keeps its layout, comments and string
//! literals, and only real tokens are replaced.
//!
//! # Example
//!
//! ```ignore
//! use pygyat::{MappingTable, transpile_str};
//!
//! let python = transpile_str("chat is this real x twin 1:  # check\n", MappingTable::default_table());
//! assert_eq!(python, "if x == 1:  # check\n");
//! ```

pub mod dependencies;
pub mod error;
pub mod loader;
pub mod mappings;
pub mod naming;
pub mod sanitizer;
pub mod substitute;
pub mod transpiler;

// Re-export main types for convenient access
pub use dependencies::{extract_dependencies, extract_dependencies_from_str};
pub use error::{GyatError, GyatResult};
pub use loader::{load_import_renames, load_keyword_table};
pub use mappings::{DIALECT_EXTENSION, Direction, Mapping, MappingTable, TARGET_EXTENSION};
pub use naming::{DEFAULT_PREFIX, output_name, output_name_for, output_path};
pub use sanitizer::{SanitizedLine, sanitize_line};
pub use substitute::substitute_line;
pub use transpiler::{
    ImportRenames, TranspileOptions, Transpiler, rename_imports, transpile_file, transpile_line,
    transpile_str,
};
