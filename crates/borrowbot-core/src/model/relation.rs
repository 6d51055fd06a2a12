use serde::{Deserialize, Serialize};

/// One-to-many relationship that may not have been fetched yet
///
/// `Unfetched` means hydration never ran; `Fetched(vec![])` means it ran and
/// found no children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum Relation<T> {
    Unfetched,
    Fetched(Vec<T>),
}

impl<T> Relation<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Relation::Fetched(_))
    }

    /// Children, or `None` when never fetched
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Relation::Unfetched => None,
            Relation::Fetched(items) => Some(items),
        }
    }

    /// Number of children, or `None` when never fetched
    pub fn len(&self) -> Option<usize> {
        self.as_slice().map(<[T]>::len)
    }

    /// Iterate fetched children; yields nothing when unfetched
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().unwrap_or(&[]).iter()
    }
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Relation::Unfetched
    }
}

impl<T> From<Vec<T>> for Relation<T> {
    fn from(items: Vec<T>) -> Self {
        Relation::Fetched(items)
    }
}
