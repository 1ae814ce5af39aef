//! Saved filter records as delivered by the management protocol.
//!
//! The server sends a filter's terms pre-split into `{column, relation, value}`
//! records. These are validated here and turned into the same [`FilterTerm`]s
//! that parsing the equivalent filter string produces.

use crate::{
    error::FilterError,
    relation::Relation,
    term::{FilterTerm, is_valid_keyword, quote_value},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Bare words that act as boolean connectives and are rendered without relation.
pub const CONNECTIVES: [&str; 5] = ["and", "or", "not", "re", "regexp"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterElement {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub filter_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw filter string, used when no keyword records are present.
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub keywords: Option<KeywordList>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keyword: OneOrMany<KeywordRecord>,
}

/// XML-derived payloads collapse single-element lists into a bare object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub value: Value,
}

impl KeywordRecord {
    pub fn new(column: &str, relation: &str, value: &str) -> Self {
        KeywordRecord {
            column: column.to_string(),
            relation: relation.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    pub fn to_term(&self) -> Result<FilterTerm, FilterError> {
        let value = quote_value(&self.value_text()?);

        let relation = if self.relation.is_empty() {
            None
        } else {
            Some(self.relation.parse::<Relation>()?)
        };

        if self.column.is_empty() {
            let relation = match relation {
                Some(Relation::Approx) if CONNECTIVES.contains(&value.as_str()) => None,
                other => other,
            };
            return Ok(FilterTerm::bare(relation, value));
        }

        if !is_valid_keyword(&self.column) {
            return Err(FilterError::InvalidKeyword(self.column.clone()));
        }

        Ok(FilterTerm::new(
            self.column.clone(),
            relation.unwrap_or(Relation::Equal),
            value,
        ))
    }

    fn value_text(&self) -> Result<String, FilterError> {
        match &self.value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(FilterError::InvalidKeywordValue {
                column: self.column.clone(),
                found: other.to_string(),
            }),
        }
    }
}

impl FilterElement {
    pub fn from_json(source: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Keyword records are authoritative; `term` is only a fallback.
    pub fn has_keywords(&self) -> bool {
        self.keywords.is_some()
    }

    pub fn keyword_terms(&self) -> Result<Vec<FilterTerm>, FilterError> {
        let Some(keywords) = &self.keywords else {
            return Ok(Vec::new());
        };

        let terms = keywords
            .keyword
            .as_slice()
            .iter()
            .map(KeywordRecord::to_term)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Converted {} keyword records into filter terms", terms.len());
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_record() {
        let term = KeywordRecord::new("", "~", "abc").to_term().unwrap();
        assert!(term.is_bare());
        assert_eq!(term.to_string(), "~abc");
    }

    #[test]
    fn test_connective_drops_relation() {
        for word in CONNECTIVES {
            let term = KeywordRecord::new("", "~", word).to_term().unwrap();
            assert_eq!(term.relation(), None);
            assert_eq!(term.to_string(), word);
        }

        // Only the approximate relation marks an implicit connective
        let term = KeywordRecord::new("", "=", "and").to_term().unwrap();
        assert_eq!(term.to_string(), "=and");
    }

    #[test]
    fn test_keyword_record() {
        let term = KeywordRecord::new("rows", "=", "10").to_term().unwrap();
        assert_eq!(term.to_string(), "rows=10");
    }

    #[test]
    fn test_keyword_record_without_relation_defaults_to_equal() {
        let term = KeywordRecord::new("rows", "", "10").to_term().unwrap();
        assert_eq!(term.to_string(), "rows=10");
    }

    #[test]
    fn test_value_with_whitespace_is_quoted() {
        let term = KeywordRecord::new("name", "=", "web server").to_term().unwrap();
        assert_eq!(term.to_string(), r#"name="web server""#);

        let term = KeywordRecord::new("", "~", "web server").to_term().unwrap();
        assert_eq!(term.to_string(), r#"~"web server""#);
    }

    #[test]
    fn test_invalid_column_rejected() {
        for column in ["a.b", "sort reverse", "rows="] {
            let result = KeywordRecord::new(column, "=", "1").to_term();
            assert!(
                matches!(&result, Err(FilterError::InvalidKeyword(c)) if c == column),
                "column {:?} should be rejected",
                column
            );
        }
    }

    #[test]
    fn test_unknown_relation_rejected() {
        let result = KeywordRecord::new("rows", "!=", "10").to_term();
        assert!(matches!(result, Err(FilterError::UnknownRelation(r)) if r == "!="));
    }

    #[test]
    fn test_scalar_values() {
        let record: KeywordRecord =
            serde_json::from_str(r#"{"column": "rows", "relation": "=", "value": 10}"#).unwrap();
        assert_eq!(record.to_term().unwrap().to_string(), "rows=10");

        let record: KeywordRecord =
            serde_json::from_str(r#"{"column": "name", "relation": "="}"#).unwrap();
        assert_eq!(record.to_term().unwrap().to_string(), "name=");
    }

    #[test]
    fn test_nested_value_rejected() {
        let record: KeywordRecord =
            serde_json::from_str(r#"{"column": "rows", "relation": "=", "value": [1]}"#).unwrap();
        assert!(matches!(
            record.to_term(),
            Err(FilterError::InvalidKeywordValue { .. })
        ));
    }

    #[test]
    fn test_single_keyword_object() {
        let elem = FilterElement::from_json(
            r#"{"keywords": {"keyword": {"column": "", "relation": "~", "value": "abc"}}}"#,
        )
        .unwrap();
        let terms = elem.keyword_terms().unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].to_string(), "~abc");
    }

    #[test]
    fn test_identity_fields() {
        let elem =
            FilterElement::from_json(r#"{"_id": "100", "type": "task", "term": "abc=1"}"#).unwrap();
        assert_eq!(elem.id.as_deref(), Some("100"));
        assert_eq!(elem.filter_type.as_deref(), Some("task"));
        assert!(!elem.has_keywords());
        assert!(elem.keyword_terms().unwrap().is_empty());
    }
}
