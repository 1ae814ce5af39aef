use filter_syntax::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
