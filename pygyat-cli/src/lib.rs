//! Command-line driver for the PyGyat transpiler
//!
//! The driver decides which files to translate and in what order, then hands
//! each one to [`pygyat::Transpiler`]. It never runs the generated Python.

pub mod driver;
pub mod plan;

pub use driver::{DependencyReport, DriverOptions, dependency_reports, run};
pub use plan::build_plan;
