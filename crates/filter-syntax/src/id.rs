use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Identifier of a saved filter on the management server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterId(Arc<str>);

impl FilterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FilterId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FilterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_id_json() {
        let id = FilterId::new("4a8f");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""4a8f""#);

        let back: FilterId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.as_str(), "4a8f");
    }
}
