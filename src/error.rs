use thiserror::Error;

/// Everything that can go wrong in the library. Each variant is returned
/// to the immediate caller; nothing is retried internally.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("cannot draw {requested} card(s), only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("duplicate card in {0}")]
    DuplicateCard(String),

    #[error("equity evaluator unavailable: {0}")]
    EvaluatorUnavailable(String),

    #[error("malformed evaluator output: {0}")]
    MalformedEvaluatorOutput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("equity cache io: {0}")]
    Io(#[from] std::io::Error),

    #[error("equity cache record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
