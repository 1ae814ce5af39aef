use crate::{relation::Relation, term::FilterTerm};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar/filter.pest"]
pub struct FilterParser;

/// Raised when the grammar rejects input. The grammar accepts every string,
/// so callers treat this as a degraded parse rather than a user error.
#[derive(Error, Debug)]
#[error("Filter syntax error at column {column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub column: usize,
}

impl SyntaxError {
    fn from_pest_error(err: pest::error::Error<Rule>) -> Self {
        use pest::error::LineColLocation;

        let column = match err.line_col {
            LineColLocation::Pos((_, c)) => c,
            LineColLocation::Span((_, c), _) => c,
        };

        SyntaxError {
            message: format!("{}", err.variant),
            column,
        }
    }
}

/// Tokenize a filter string into its ordered term list.
pub fn parse_terms(input: &str) -> Result<Vec<FilterTerm>, SyntaxError> {
    let mut pairs =
        FilterParser::parse(Rule::filter, input).map_err(SyntaxError::from_pest_error)?;

    let terms = match pairs.next() {
        Some(filter) => filter
            .into_inner()
            .filter(|p| p.as_rule() == Rule::term)
            .map(build_term)
            .collect(),
        None => Vec::new(),
    };

    Ok(terms)
}

fn build_term(pair: Pair<Rule>) -> FilterTerm {
    let mut keyword = None;
    let mut relation = None;
    let mut value = String::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::keyword => keyword = Some(part.as_str().to_string()),
            Rule::relation => relation = part.as_str().chars().next().and_then(Relation::from_char),
            Rule::value => value = part.as_str().to_string(),
            _ => {}
        }
    }

    FilterTerm::from_parts(keyword, relation, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> FilterTerm {
        let terms = parse_terms(input).unwrap();
        assert_eq!(terms.len(), 1, "expected one term in {:?}", input);
        terms.into_iter().next().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_terms("").unwrap().is_empty());
        assert!(parse_terms("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_keyword_term() {
        let term = single("rows=10");
        assert_eq!(term.keyword(), Some("rows"));
        assert_eq!(term.relation(), Some(Relation::Equal));
        assert_eq!(term.value(), "10");
    }

    #[test]
    fn test_all_keyword_relations() {
        for (input, relation) in [
            ("severity~high", Relation::Approx),
            ("name=foo", Relation::Equal),
            ("severity>5.0", Relation::Greater),
            ("severity<5.0", Relation::Less),
            ("tag:foo", Relation::Tag),
        ] {
            let term = single(input);
            assert_eq!(term.relation(), Some(relation), "relation of {}", input);
            assert!(term.keyword().is_some());
        }
    }

    #[test]
    fn test_bare_relation_term() {
        let term = single("~abc");
        assert_eq!(term.keyword(), None);
        assert_eq!(term.relation(), Some(Relation::Approx));
        assert_eq!(term.value(), "abc");
    }

    #[test]
    fn test_bare_value_term() {
        let term = single("abc");
        assert_eq!(term.keyword(), None);
        assert_eq!(term.relation(), None);
        assert_eq!(term.value(), "abc");
    }

    #[test]
    fn test_first_relation_marker_wins() {
        // "sort=a~b" splits at "=", the value keeps the "~"
        let term = single("sort=a~b");
        assert_eq!(term.keyword(), Some("sort"));
        assert_eq!(term.relation(), Some(Relation::Equal));
        assert_eq!(term.value(), "a~b");
    }

    #[test]
    fn test_keyword_with_dash_and_underscore() {
        let term = single("sort-reverse=name");
        assert_eq!(term.keyword(), Some("sort-reverse"));

        let term = single("apply_overrides=1");
        assert_eq!(term.keyword(), Some("apply_overrides"));
    }

    #[test]
    fn test_quoted_value_keeps_whitespace() {
        let terms = parse_terms(r#"name="abc def" rows=10"#).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value(), r#""abc def""#);
        assert_eq!(terms[1].keyword(), Some("rows"));
    }

    #[test]
    fn test_unterminated_quote_absorbs_rest() {
        let terms = parse_terms(r#"rows=10 name="abc def first=1"#).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1].keyword(), Some("name"));
        assert_eq!(terms[1].value(), r#""abc def first=1"#);
    }

    #[test]
    fn test_non_identifier_prefix_is_bare_value() {
        // "." is not a keyword character, so no keyword is split off
        let term = single("a.b=c");
        assert_eq!(term.keyword(), None);
        assert_eq!(term.relation(), None);
        assert_eq!(term.value(), "a.b=c");
    }

    #[test]
    fn test_relation_without_value() {
        let term = single("name=");
        assert_eq!(term.keyword(), Some("name"));
        assert_eq!(term.value(), "");

        let term = single("~");
        assert_eq!(term.keyword(), None);
        assert_eq!(term.relation(), Some(Relation::Approx));
        assert_eq!(term.value(), "");
    }

    #[test]
    fn test_order_is_preserved() {
        let values: Vec<String> = parse_terms("abc and not def")
            .unwrap()
            .iter()
            .map(|t| t.value().to_string())
            .collect();
        assert_eq!(values, vec!["abc", "and", "not", "def"]);
    }
}
