use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewswireError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus directory not found: {path}")]
    CorpusDirNotFound { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NewswireError>;
