use crate::error::CliError;
use filter_syntax::{Filter, FilterTerm};
use serde::Serialize;

#[derive(Serialize)]
struct TermRow<'a> {
    index: usize,
    #[serde(flatten)]
    term: &'a FilterTerm,
}

pub fn terms_json(filter: &Filter) -> Result<String, CliError> {
    let rows: Vec<TermRow> = filter
        .terms()
        .iter()
        .enumerate()
        .map(|(index, term)| TermRow { index, term })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn terms_table(filter: &Filter) -> String {
    let mut out = format!("{:<6} {:<16} {:<9} {}\n", "#", "Keyword", "Relation", "Value");
    for (index, term) in filter.terms().iter().enumerate() {
        let relation = term
            .relation()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<6} {:<16} {:<9} {}\n",
            index,
            term.keyword().unwrap_or("-"),
            relation,
            term.value()
        ));
    }
    out
}
