/// Append-only list of previously evaluated expression strings.
///
/// The `H(i)` function reads entries by index and re-evaluates them as
/// fresh expressions. A session appends each top-level expression at most
/// once; duplicates are skipped.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns entry `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Appends an expression string.
    pub fn append(&mut self, expression: impl Into<String>) {
        self.entries.push(expression.into());
    }

    /// Tests whether an identical entry is already stored.
    #[must_use]
    pub fn contains(&self, expression: &str) -> bool {
        self.entries.iter().any(|e| e == expression)
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Tests whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the stored entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
