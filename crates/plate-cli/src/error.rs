use elisa_plate::core::io::layout_csv::LayoutFileError;
use elisa_plate::core::models::grid::LayoutError;
use elisa_plate::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Layout edit failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn layout_file(path: impl Into<PathBuf>, error: LayoutFileError) -> Self {
        match error {
            LayoutFileError::Io(e) => CliError::Io(e),
            other => CliError::FileParsing {
                path: path.into(),
                source: other.into(),
            },
        }
    }
}
