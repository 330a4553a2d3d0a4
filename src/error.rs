#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TokenCountError {
    /* ────── selectors ────── */
    #[error("never heard of '{0}' ClipCheckpoint")]
    UnknownCheckpoint(String),

    #[error("never heard of a '{0}' ClipImplementation")]
    UnknownImplementation(String),

    #[error("unrecognized device tag '{0}'")]
    UnknownDevice(String),

    /* ────── hub / tokenizer / fs ────── */
    #[error(transparent)]
    Hub(#[from] hf_hub::api::sync::ApiError),

    #[error(transparent)]
    Tokenizer(#[from] tokenizers::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TokenCountError>;
