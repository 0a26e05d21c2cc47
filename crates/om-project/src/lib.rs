//! om-project: measurement case files and their validation.
//!
//! A case file lists one or more orifice measurements with their plate
//! geometry, sample series and optional solver and air overrides. Files are
//! read and written as YAML or JSON and validated on both paths.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_case_file};

use om_solver::{FlowRateSolution, SolveOptions, SolverResult};
use rayon::prelude::*;
use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown case: {id}")]
    UnknownCase { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a case file, choosing the format from the extension (`.json` or YAML).
pub fn load(path: &Path) -> ProjectResult<CaseFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<CaseFile> {
    let content = std::fs::read_to_string(path)?;
    let file: CaseFile = serde_yaml::from_str(&content)?;
    validate_case_file(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &Path, file: &CaseFile) -> ProjectResult<()> {
    validate_case_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<CaseFile> {
    let content = std::fs::read_to_string(path)?;
    let file: CaseFile = serde_json::from_str(&content)?;
    validate_case_file(&file)?;
    Ok(file)
}

pub fn save_json(path: &Path, file: &CaseFile) -> ProjectResult<()> {
    validate_case_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Cases selected by `id`, or all cases when `id` is `None`.
pub fn select_cases<'a>(file: &'a CaseFile, id: Option<&str>) -> ProjectResult<Vec<&'a CaseDef>> {
    match id {
        Some(id) => file
            .case(id)
            .map(|case| vec![case])
            .ok_or_else(|| ProjectError::UnknownCase { id: id.to_string() }),
        None => Ok(file.cases.iter().collect()),
    }
}

/// Solve the given cases in parallel, keeping their order.
pub fn solve_cases(
    cases: &[&CaseDef],
    options: SolveOptions,
) -> Vec<SolverResult<FlowRateSolution>> {
    cases.par_iter().map(|case| case.solve(options)).collect()
}
