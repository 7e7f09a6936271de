use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The needle has nothing to compare against once normalized.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("similarity metric unavailable: {0}")]
    MetricUnavailable(String),
}
