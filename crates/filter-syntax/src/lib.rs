//! Query filter model for entity listings.
//!
//! A filter string such as `abc and not def rows=10 first=1 sort=name` is
//! parsed into an ordered list of [`FilterTerm`]s, queried and mutated by
//! keyword, and rendered back to the exact canonical string handed to the
//! management server.

pub mod error;
pub mod filter;
pub mod id;
pub mod keywords;
pub mod parser;
pub mod relation;
pub mod settings;
pub mod term;
pub mod value;

pub use error::FilterError;
pub use filter::{Filter, SortOrder};
pub use id::FilterId;
pub use keywords::{FilterElement, KeywordRecord};
pub use relation::Relation;
pub use settings::FilterSettings;
pub use term::FilterTerm;
pub use value::FilterValue;
