//! Maps a free-text audit query onto one of the supported actions.
//!
//! Matching is a case-insensitive substring test against a fixed, ordered
//! table of phrases. The first entry with a matching phrase wins.

use std::fmt;

/// Example phrasings shown when a query is not understood.
pub const SUGGESTED_QUERIES: [&str; 2] = ["find public apps", "test connection"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// Audit every app for public or "everyone" sharing.
    PublicApps,
    /// List environments to verify credentials and connectivity.
    TestConnection,
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryIntent::PublicApps => write!(f, "public apps audit"),
            QueryIntent::TestConnection => write!(f, "connection test"),
        }
    }
}

const INTENT_PHRASES: &[(QueryIntent, &[&str])] = &[
    (
        QueryIntent::PublicApps,
        &["public apps", "apps shared with everyone"],
    ),
    (QueryIntent::TestConnection, &["test connection"]),
];

impl QueryIntent {
    /// Recognise a query. `None` means it is not understood, which is a
    /// normal outcome rather than an error.
    pub fn recognize(query: &str) -> Option<Self> {
        let query = query.to_lowercase();

        INTENT_PHRASES
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|phrase| query.contains(*phrase)))
            .map(|(intent, _)| *intent)
    }
}
