use std::path::PathBuf;

use thiserror::Error;

use crate::classifier::ClassIndex;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid binary artifact: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("unsupported artifact format for {0} (expected .json or .bin)")]
    UnsupportedFormat(PathBuf),
    #[error("symptom vocabulary is empty")]
    EmptyVocabulary,
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("model expects {model} features but the vocabulary has {vocabulary} symptoms")]
    DimensionMismatch { vocabulary: usize, model: usize },
    #[error("class {0} can be predicted but has no disease label")]
    MissingLabel(ClassIndex),
    #[error("classifier produced class {0} which has no disease label")]
    UnknownClass(ClassIndex),
}

impl Error {
    pub(crate) fn invalid_model(msg: impl Into<String>) -> Self {
        Error::InvalidModel(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
