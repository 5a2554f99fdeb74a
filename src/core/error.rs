use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntityError {
    #[error("Type mismatch: set represents '{expected}', got '{found}'")]
    TypeMismatch { expected: String, found: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Entity type '{0}' is not registered")]
    UnknownType(String),

    #[error("Mapper '{0}' not found")]
    UnknownMapper(String),

    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, EntityError>;

impl From<serde_json::Error> for EntityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for EntityError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for EntityError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
