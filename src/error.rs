use std::{io, path::PathBuf};

/// Errors raised while loading data, training, or persisting a classifier
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode or decode the model: {0}")]
    Codec(#[from] serde_cbor::Error),

    #[error("failed to build the tokenizer thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{0} set is empty")]
    EmptyDataset(&'static str),

    #[error("feature vocabulary is empty")]
    EmptyVocabulary,

    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{samples} samples but {labels} labels")]
    LabelMismatch { samples: usize, labels: usize },

    #[error("vocabulary file does not match the vocabulary the model was trained with")]
    VocabularyMismatch,
}

impl ClassifierError {
    /// I/O エラーにパスを付与する
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
