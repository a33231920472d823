//! Free-text row filter.

/// Normalized filter query: trimmed and lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Matches when the key or the displayed value contains the query,
    /// case-insensitively. An empty query matches everything.
    pub fn matches(&self, key: &str, display: &str) -> bool {
        self.0.is_empty()
            || key.to_lowercase().contains(&self.0)
            || display.to_lowercase().contains(&self.0)
    }
}
