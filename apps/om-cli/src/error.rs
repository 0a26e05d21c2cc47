use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Case file error: {0}")]
    Project(#[from] om_project::ProjectError),

    #[error("Solver error: {0}")]
    Solver(#[from] om_solver::SolverError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{failed} of {total} cases failed")]
    CasesFailed { failed: usize, total: usize },
}

pub type AppResult<T> = Result<T, AppError>;
