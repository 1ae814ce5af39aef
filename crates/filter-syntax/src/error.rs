use thiserror::Error;

/// Errors raised at the boundaries of the filter model.
///
/// Parsing filter strings and the keyword accessors never fail; only
/// structured records and settings are validated.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A structured keyword record used a relation outside `~ = > < :`.
    #[error("Unknown filter relation: '{0}'")]
    UnknownRelation(String),

    /// A structured keyword record carried a value that is not a scalar.
    #[error("Invalid value for filter keyword '{column}': {found}")]
    InvalidKeywordValue { column: String, found: String },

    /// A structured keyword record named a column the grammar cannot read back.
    #[error("Invalid filter keyword: '{0}'")]
    InvalidKeyword(String),

    #[error("Invalid filter settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to decode filter record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read filter settings: {0}")]
    Io(#[from] std::io::Error),
}
