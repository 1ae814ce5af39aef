use serde::{Deserialize, Serialize};
use std::fmt;

/// A keyword value as handed out by [`Filter::get`](crate::filter::Filter::get).
///
/// Values of numeric keywords such as `first` and `rows` come back as
/// numbers, everything else as the literal text stored in the term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(i64),
    Text(String),
}

impl FilterValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            FilterValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<&String> for FilterValue {
    fn from(s: &String) -> Self {
        FilterValue::Text(s.clone())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(n.into())
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        FilterValue::Number(n.into())
    }
}

impl PartialEq<&str> for FilterValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, FilterValue::Text(s) if s == other)
    }
}

impl PartialEq<i64> for FilterValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, FilterValue::Number(n) if n == other)
    }
}
