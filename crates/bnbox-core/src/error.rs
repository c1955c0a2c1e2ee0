use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access message file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode message document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid attribute {name}: {value:?}")]
    InvalidAttribute { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
