use crate::relation::Relation;
use serde::Serialize;
use std::fmt;

/// One atomic filter condition: `keyword? relation? value`.
///
/// A term without a keyword is a *bare* term. Bare terms carry full-text
/// tokens and boolean connectives, and their relative order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterTerm {
    keyword: Option<String>,
    relation: Option<Relation>,
    value: String,
}

impl FilterTerm {
    /// Create a keyword term, e.g. `rows=10`.
    pub fn new(keyword: impl Into<String>, relation: Relation, value: impl Into<String>) -> Self {
        Self::from_parts(Some(keyword.into()), Some(relation), value.into())
    }

    /// Create a term without keyword, e.g. `~abc` or `and`.
    pub fn bare(relation: Option<Relation>, value: impl Into<String>) -> Self {
        Self::from_parts(None, relation, value.into())
    }

    /// An empty keyword is the same as no keyword.
    pub fn from_parts(keyword: Option<String>, relation: Option<Relation>, value: String) -> Self {
        let keyword = keyword.filter(|k| !k.is_empty());
        FilterTerm {
            keyword,
            relation,
            value,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_bare(&self) -> bool {
        self.keyword.is_none()
    }

    /// Exact keyword match; bare terms never match.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword.as_deref() == Some(keyword)
    }

    pub(crate) fn replace(&mut self, relation: Relation, value: String) {
        self.relation = Some(relation);
        self.value = value;
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = &self.keyword {
            write!(f, "{}", keyword)?;
        }
        if let Some(relation) = self.relation {
            write!(f, "{}", relation)?;
        }
        write!(f, "{}", self.value)
    }
}

/// Characters the grammar treats as term separators.
pub const SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Whether the grammar reads `keyword` back as a keyword: `[A-Za-z0-9_-]+`.
pub fn is_valid_keyword(keyword: &str) -> bool {
    !keyword.is_empty()
        && keyword
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Wrap values containing separators in quotes so they stay a single token.
/// Values that already contain a quote are left untouched.
pub fn quote_value(value: &str) -> String {
    if value.contains(SEPARATORS) && !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
