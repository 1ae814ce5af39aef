use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison operator linking a keyword to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// `~` contains / approximate match
    Approx,
    /// `=` exact match
    Equal,
    /// `>` greater than
    Greater,
    /// `<` less than
    Less,
    /// `:` deprecated tag marker
    Tag,
}

impl Relation {
    /// All relations in the order the parser tries them.
    pub const ALL: [Relation; 5] = [
        Relation::Approx,
        Relation::Equal,
        Relation::Greater,
        Relation::Less,
        Relation::Tag,
    ];

    pub fn as_char(self) -> char {
        match self {
            Relation::Approx => '~',
            Relation::Equal => '=',
            Relation::Greater => '>',
            Relation::Less => '<',
            Relation::Tag => ':',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|rel| rel.as_char() == c)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| FilterError::UnknownRelation(s.to_string()))
            }
            _ => Err(FilterError::UnknownRelation(s.to_string())),
        }
    }
}
