//! CLI-specific error types and exit code mapping

use isoprobe_core::error::IsoprobeError;
use isoprobe_scenario::ScenarioError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Scenario failed (step error, assertion, bad override, unknown name).
    #[error("scenario failed: {0}")]
    Scenario(#[from] ScenarioError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (cwd lookup, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from isoprobe-core.
    #[error("{0}")]
    Core(#[from] IsoprobeError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | Assertion failure / general error        |
    /// | 2    | Configuration error                      |
    /// | 3    | Dataset location error                   |
    /// | 4    | Data load error                          |
    /// | 5    | Training or prediction error             |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Core(e) => core_exit_code(e),
            Self::Scenario(ScenarioError::Step { source, .. }) => core_exit_code(source),
            Self::Scenario(_) | Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

fn core_exit_code(err: &IsoprobeError) -> i32 {
    match err {
        IsoprobeError::Config(_) => 2,
        IsoprobeError::Location(_) => 3,
        IsoprobeError::DataLoad(_) => 4,
        IsoprobeError::Training(_) | IsoprobeError::Prediction(_) => 5,
        IsoprobeError::Io(_) => 10,
    }
}
