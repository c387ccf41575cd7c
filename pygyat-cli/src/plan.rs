//! Build order for a set of PyGyat files
//!
//! Imports that resolve to a `.gyat` file in the importing file's directory
//! are translated too, before the file that imports them. Imports of anything
//! else (Python modules, packages in other directories) are left for Python
//! to resolve at run time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pygyat::{GyatResult, extract_dependencies};
use tracing::debug;

/// Order `inputs` and, when `follow_imports` is set, the local modules they
/// import, dependencies first. Every file appears once; import cycles are
/// cut at the first file seen twice.
///
/// # Errors
/// - A file whose imports are followed cannot be read
pub fn build_plan(inputs: &[PathBuf], follow_imports: bool) -> GyatResult<Vec<PathBuf>> {
    let mut planner = Planner {
        follow_imports,
        seen: HashSet::new(),
        order: Vec::new(),
    };
    for input in inputs {
        planner.visit(input)?;
    }
    Ok(planner.order)
}

struct Planner {
    follow_imports: bool,
    seen: HashSet<PathBuf>,
    order: Vec<PathBuf>,
}

impl Planner {
    fn visit(&mut self, path: &Path) -> GyatResult<()> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.seen.insert(key) {
            return Ok(());
        }

        if self.follow_imports {
            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            for dependency in extract_dependencies(path)? {
                let candidate = dir.join(&dependency);
                if candidate.is_file() {
                    self.visit(&candidate)?;
                } else {
                    debug!("{} is not a local PyGyat module", dependency);
                }
            }
        }

        self.order.push(path.to_path_buf());
        Ok(())
    }
}
