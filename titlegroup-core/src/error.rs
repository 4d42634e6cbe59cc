use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupingError {
    /// An exclusion entry could not be compiled into the matcher pattern.
    #[error("Exclusion pattern failed to compile: {pattern}")]
    PatternCompilation {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Collator unavailable: {0}")]
    Collation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GroupingError>;
