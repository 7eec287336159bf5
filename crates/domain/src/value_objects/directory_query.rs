//! Directory lookup query

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a query term is matched against directory records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Match the term against full, first, middle and last name as well as
    /// the primary email, any field matching (OR relation)
    #[default]
    Fuzzy,
    /// Match the term against the primary email only
    ExactEmail,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::ExactEmail => write!(f, "exact_email"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fuzzy" => Ok(Self::Fuzzy),
            "exact_email" | "exact-email" | "exact" => Ok(Self::ExactEmail),
            _ => Err(format!(
                "Invalid match strategy: {s}. Use 'fuzzy' or 'exact_email'"
            )),
        }
    }
}

/// A free-text directory lookup, constructed per lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    term: String,
    strategy: MatchStrategy,
}

impl DirectoryQuery {
    /// Create a fuzzy name-or-email query
    pub fn new(term: impl AsRef<str>) -> Self {
        Self::with_strategy(term, MatchStrategy::Fuzzy)
    }

    /// Create a query with an explicit matching strategy
    pub fn with_strategy(term: impl AsRef<str>, strategy: MatchStrategy) -> Self {
        Self {
            term: term.as_ref().trim().to_string(),
            strategy,
        }
    }

    /// The trimmed search term
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The matching strategy
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Whether the term is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_fuzzy() {
        let query = DirectoryQuery::new("jane@example.com");
        assert_eq!(query.strategy(), MatchStrategy::Fuzzy);
        assert_eq!(query.term(), "jane@example.com");
    }

    #[test]
    fn term_is_trimmed() {
        let query = DirectoryQuery::with_strategy("  Jane Doe ", MatchStrategy::ExactEmail);
        assert_eq!(query.term(), "Jane Doe");
        assert!(!query.is_blank());
    }

    #[test]
    fn whitespace_only_term_is_blank() {
        assert!(DirectoryQuery::new("   ").is_blank());
    }

    #[test]
    fn strategy_parses_from_str() {
        assert_eq!("fuzzy".parse::<MatchStrategy>().unwrap(), MatchStrategy::Fuzzy);
        assert_eq!(
            "EXACT_EMAIL".parse::<MatchStrategy>().unwrap(),
            MatchStrategy::ExactEmail
        );
        assert!("ranked".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn strategy_serializes_snake_case() {
        let json = serde_json::to_string(&MatchStrategy::ExactEmail).unwrap();
        assert_eq!(json, "\"exact_email\"");
    }
}
