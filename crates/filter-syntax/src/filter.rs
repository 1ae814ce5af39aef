use crate::{
    error::FilterError,
    id::FilterId,
    keywords::FilterElement,
    parser,
    relation::Relation,
    settings::FilterSettings,
    term::{FilterTerm, is_valid_keyword, quote_value},
    value::FilterValue,
};
use lazy_static::lazy_static;
use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};
use tracing::{debug, warn};

pub const FIRST: &str = "first";
pub const ROWS: &str = "rows";
pub const SORT: &str = "sort";
pub const SORT_REVERSE: &str = "sort-reverse";

/// Keywords that control paging and ordering rather than selection.
pub const PAGING_KEYWORDS: [&str; 4] = [FIRST, ROWS, SORT, SORT_REVERSE];

/// `rows` value requesting every row on a single page.
pub const ALL_ROWS: i64 = -1;

lazy_static! {
    static ref DEFAULT_SETTINGS: FilterSettings = FilterSettings::default();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => SORT,
            SortOrder::Descending => SORT_REVERSE,
        }
    }
}

/// An ordered list of filter terms plus optional saved-filter identity.
///
/// Term order is kept exactly as parsed: bare terms such as `and`/`not`
/// encode boolean structure only through their position.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<FilterTerm>,
    id: Option<FilterId>,
    filter_type: Option<String>,
    name: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: impl IntoIterator<Item = FilterTerm>) -> Self {
        Filter {
            terms: terms.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Parse a filter string. Never fails: input the grammar rejects is kept
    /// as one bare term.
    pub fn from_string(input: &str) -> Self {
        Self::from_terms(parse_or_degrade(input))
    }

    /// Build a filter from a saved filter record.
    pub fn from_element(elem: FilterElement) -> Result<Self, FilterError> {
        let terms = if elem.has_keywords() {
            elem.keyword_terms()?
        } else {
            elem.term.as_deref().map(parse_or_degrade).unwrap_or_default()
        };

        Ok(Filter {
            terms,
            id: elem.id.map(FilterId::from),
            filter_type: elem.filter_type,
            name: elem.name,
        })
    }

    pub fn from_json(source: &str) -> Result<Self, FilterError> {
        Self::from_element(FilterElement::from_json(source)?)
    }

    pub fn with_id(mut self, id: impl Into<FilterId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = Some(filter_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Option<&FilterId> {
        self.id.as_ref()
    }

    pub fn filter_type(&self) -> Option<&str> {
        self.filter_type.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// First term carrying exactly this keyword.
    pub fn get_term(&self, keyword: &str) -> Option<&FilterTerm> {
        self.terms.iter().find(|t| t.has_keyword(keyword))
    }

    pub fn has(&self, keyword: &str) -> bool {
        self.get_term(keyword).is_some()
    }

    pub fn get(&self, keyword: &str) -> Option<FilterValue> {
        self.get_with(keyword, &DEFAULT_SETTINGS)
    }

    pub fn get_with(&self, keyword: &str, settings: &FilterSettings) -> Option<FilterValue> {
        let term = self.get_term(keyword)?;
        let raw = term.value();

        if !settings.is_numeric(keyword) {
            return Some(FilterValue::Text(raw.to_string()));
        }

        match raw.parse::<i64>() {
            Ok(n) => Some(FilterValue::Number(n)),
            Err(_) => {
                warn!("Non-numeric value '{}' for numeric keyword '{}'", raw, keyword);
                Some(FilterValue::Text(raw.to_string()))
            }
        }
    }

    /// Replace the first term with this keyword in place, or append a new one.
    pub fn set(
        &mut self,
        keyword: &str,
        value: impl Into<FilterValue>,
        relation: Relation,
    ) -> &mut Self {
        if !is_valid_keyword(keyword) {
            warn!("Ignoring set on invalid keyword '{}'", keyword);
            return self;
        }

        let value = match value.into() {
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Text(s) => quote_value(&s),
        };

        match self.terms.iter_mut().find(|t| t.has_keyword(keyword)) {
            Some(term) => term.replace(relation, value),
            None => self.terms.push(FilterTerm::new(keyword, relation, value)),
        }
        self
    }

    /// `set` with the `=` relation.
    pub fn set_value(&mut self, keyword: &str, value: impl Into<FilterValue>) -> &mut Self {
        self.set(keyword, value, Relation::Equal)
    }

    /// Remove the first term with this keyword. Bare terms are never removed.
    pub fn delete(&mut self, keyword: &str) -> &mut Self {
        if let Some(index) = self.terms.iter().position(|t| t.has_keyword(keyword)) {
            self.terms.remove(index);
        }
        self
    }

    /// Keyword terms compare as an unordered collection; bare terms must
    /// appear in the same relative order.
    pub fn equals(&self, other: &Filter) -> bool {
        if self.terms.len() != other.terms.len() {
            return false;
        }

        if bare_terms(self) != bare_terms(other) {
            return false;
        }

        sorted_keyword_terms(self) == sorted_keyword_terms(other)
    }

    /// Independent deep copy, identity metadata included.
    pub fn copy(&self) -> Filter {
        self.clone()
    }

    /// Filter for the following page: `first + rows`.
    pub fn next(&self) -> Filter {
        self.next_with(&DEFAULT_SETTINGS)
    }

    pub fn next_with(&self, settings: &FilterSettings) -> Filter {
        let (first, rows) = self.paging(settings);
        let mut filter = self.copy();
        filter.set_value(FIRST, first.saturating_add(rows));
        filter
    }

    /// Filter for the preceding page, never going below the first row.
    pub fn previous(&self) -> Filter {
        self.previous_with(&DEFAULT_SETTINGS)
    }

    pub fn previous_with(&self, settings: &FilterSettings) -> Filter {
        let (first, rows) = self.paging(settings);
        let mut filter = self.copy();
        filter.set_value(FIRST, first.saturating_sub(rows).max(1));
        filter
    }

    pub fn first_page(&self) -> Filter {
        let mut filter = self.copy();
        filter.set_value(FIRST, 1i64);
        filter
    }

    /// First page holding every row.
    pub fn all(&self) -> Filter {
        let mut filter = self.first_page();
        filter.set_value(ROWS, ALL_ROWS);
        filter
    }

    /// Copy without paging and sorting keywords.
    pub fn simple(&self) -> Filter {
        let mut filter = self.copy();
        filter
            .terms
            .retain(|t| !t.keyword().is_some_and(|k| PAGING_KEYWORDS.contains(&k)));
        filter
    }

    fn sort_term_index(&self) -> Option<usize> {
        self.terms
            .iter()
            .position(|t| t.has_keyword(SORT) || t.has_keyword(SORT_REVERSE))
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_term_index().map(|i| self.terms[i].value())
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_term_index().map(|i| {
            if self.terms[i].has_keyword(SORT_REVERSE) {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            }
        })
    }

    /// Sort by `field`, keeping the current order (ascending if unset).
    pub fn set_sort_by(&mut self, field: &str) -> &mut Self {
        let order = self.sort_order().unwrap_or(SortOrder::Ascending);
        self.write_sort(order, field.to_string())
    }

    /// Flip the sort order of the current sort field. No-op without one.
    pub fn set_sort_order(&mut self, order: SortOrder) -> &mut Self {
        let Some(field) = self.sort_by().map(str::to_string) else {
            return self;
        };
        self.write_sort(order, field)
    }

    fn write_sort(&mut self, order: SortOrder, field: String) -> &mut Self {
        let term = FilterTerm::new(order.keyword(), Relation::Equal, quote_value(&field));
        match self.sort_term_index() {
            Some(index) => {
                self.terms[index] = term;
                let mut position = 0;
                self.terms.retain(|t| {
                    let keep = position == index
                        || !(t.has_keyword(SORT) || t.has_keyword(SORT_REVERSE));
                    position += 1;
                    keep
                });
            }
            None => self.terms.push(term),
        }
        self
    }

    /// Set every keyword term of `other` on this filter. Bare terms are skipped.
    pub fn merge_keywords(&mut self, other: &Filter) -> &mut Self {
        for term in other.terms.iter().filter(|t| !t.is_bare()) {
            let keyword = term.keyword().unwrap_or_default();
            let relation = term.relation().unwrap_or(Relation::Equal);
            match self.terms.iter_mut().find(|t| t.has_keyword(keyword)) {
                Some(existing) => existing.replace(relation, term.value().to_string()),
                None => self.terms.push(term.clone()),
            }
        }
        self
    }

    /// Canonical filter string: terms in order, joined by single spaces.
    pub fn to_filter_string(&self) -> String {
        join_terms(self.terms.iter())
    }

    /// Canonical string without paging and sorting keywords.
    pub fn to_criteria_string(&self) -> String {
        join_terms(
            self.terms
                .iter()
                .filter(|t| !t.keyword().is_some_and(|k| PAGING_KEYWORDS.contains(&k))),
        )
    }

    fn paging(&self, settings: &FilterSettings) -> (i64, i64) {
        let number = |keyword: &str| match self.get_with(keyword, settings) {
            Some(FilterValue::Number(n)) => Some(n),
            _ => None,
        };

        let first = number(FIRST)
            .filter(|n| *n >= 1)
            .unwrap_or(settings.default_first);
        let rows = number(ROWS)
            .filter(|n| *n > 0)
            .unwrap_or(settings.default_rows);
        (first, rows)
    }
}

fn parse_or_degrade(input: &str) -> Vec<FilterTerm> {
    match parser::parse_terms(input) {
        Ok(terms) => {
            debug!("Parsed filter '{}' into {} terms", input, terms.len());
            terms
        }
        Err(err) => {
            warn!("Keeping unparsable filter '{}' as a bare term: {}", input, err);
            let trimmed = input.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![FilterTerm::bare(None, trimmed)]
            }
        }
    }
}

fn join_terms<'a>(terms: impl Iterator<Item = &'a FilterTerm>) -> String {
    terms
        .map(|t| t.to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn bare_terms(filter: &Filter) -> Vec<&FilterTerm> {
    filter.terms.iter().filter(|t| t.is_bare()).collect()
}

fn sorted_keyword_terms(filter: &Filter) -> Vec<&FilterTerm> {
    let mut terms: Vec<&FilterTerm> = filter.terms.iter().filter(|t| !t.is_bare()).collect();
    terms.sort_by(|a, b| compare_terms(a, b));
    terms
}

fn compare_terms(a: &FilterTerm, b: &FilterTerm) -> Ordering {
    (a.keyword(), a.relation(), a.value()).cmp(&(b.keyword(), b.relation(), b.value()))
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Filter {}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_filter_string())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Filter::from_string(s))
    }
}

impl TryFrom<FilterElement> for Filter {
    type Error = FilterError;

    fn try_from(elem: FilterElement) -> Result<Self, Self::Error> {
        Filter::from_element(elem)
    }
}
