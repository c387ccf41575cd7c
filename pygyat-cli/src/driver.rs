//! What the `pygyat` command does once its arguments are parsed

use std::path::PathBuf;

use pygyat::{
    DEFAULT_PREFIX, Direction, GyatError, GyatResult, MappingTable, Transpiler,
    extract_dependencies, load_import_renames, load_keyword_table,
};
use serde::Serialize;
use tracing::info;

use crate::plan::build_plan;

/// Parsed command-line options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverOptions {
    pub inputs: Vec<PathBuf>,
    /// Output path for the single input file
    pub output: Option<String>,
    /// Explicit prefix; see [`DriverOptions::prefix`] for the default
    pub prefix: Option<String>,
    /// Write plain, non-hidden outputs
    pub compile: bool,
    pub output_dir: Option<PathBuf>,
    /// Python → PyGyat instead of PyGyat → Python
    pub reverse: bool,
    pub rename_imports: Option<PathBuf>,
    pub keywords: Option<PathBuf>,
    /// Also translate local modules the inputs import
    pub follow_imports: bool,
}

impl DriverOptions {
    pub fn direction(&self) -> Direction {
        if self.reverse {
            Direction::PythonToGyat
        } else {
            Direction::GyatToPython
        }
    }

    /// The explicit prefix if any, else none for `--compile` and reverse
    /// runs, else the hidden-file prefix
    pub fn prefix(&self) -> &str {
        match &self.prefix {
            Some(prefix) => prefix.as_str(),
            None if self.compile || self.reverse => "",
            None => DEFAULT_PREFIX,
        }
    }
}

/// Imports of one source file
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyReport {
    pub file: String,
    pub dependencies: Vec<String>,
}

pub fn dependency_reports(inputs: &[PathBuf]) -> GyatResult<Vec<DependencyReport>> {
    inputs
        .iter()
        .map(|input| {
            Ok(DependencyReport {
                file: input.display().to_string(),
                dependencies: extract_dependencies(input)?,
            })
        })
        .collect()
}

/// Translate every planned file, one after another
///
/// Returns the paths written, in build order.
///
/// # Errors
/// - No inputs, or `output` given with more than one input
/// - A configuration file cannot be loaded
/// - Any file cannot be read or written; files already written stay
pub fn run(options: &DriverOptions) -> GyatResult<Vec<PathBuf>> {
    if options.inputs.is_empty() {
        return Err(GyatError::Config("no input files given".to_string()));
    }
    if options.output.is_some() && options.inputs.len() > 1 {
        return Err(GyatError::Config(
            "an output name can only be given for a single input file".to_string(),
        ));
    }

    let direction = options.direction();
    let mut transpiler = Transpiler::new();
    transpiler
        .with_direction(direction)
        .with_prefix(options.prefix())
        .with_output_dir(options.output_dir.clone());

    if let Some(path) = &options.keywords {
        let extra = load_keyword_table(path)?;
        info!("Loaded {} extra keyword(s) from {}", extra.len(), path.display());
        transpiler.with_table(MappingTable::default_table().with_extensions(extra)?);
    }
    if let Some(path) = &options.rename_imports {
        let renames = load_import_renames(path)?;
        info!("Loaded {} import rename(s) from {}", renames.len(), path.display());
        transpiler.with_import_renames(renames);
    }

    // Python imports are never PyGyat sources
    let follow = options.follow_imports && direction == Direction::GyatToPython;
    let plan = build_plan(&options.inputs, follow)?;
    info!("Transpiling {} file(s)", plan.len());

    let mut written = Vec::with_capacity(plan.len());
    for file in &plan {
        let output_name = if options.inputs.first() == Some(file) {
            options.output.as_deref()
        } else {
            None
        };
        transpiler.with_output_name(output_name);

        let output = transpiler.transpile_file(file)?;
        info!("{} -> {}", file.display(), output.display());
        written.push(output);
    }

    Ok(written)
}
