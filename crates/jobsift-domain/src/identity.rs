//! Identity set - ids already handled by previous runs

use crate::traits::IdentitySource;
use crate::RecordId;
use std::collections::HashSet;

/// Set of record ids that must not be processed again
///
/// Grows monotonically during a run: an id is inserted only after its row
/// was durably appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySet {
    ids: HashSet<RecordId>,
}

impl IdentitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` was already handled
    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Record `id` as handled; returns false if it was already present
    pub fn insert(&mut self, id: RecordId) -> bool {
        if id.is_empty() {
            return false;
        }
        self.ids.insert(id)
    }

    /// Number of known ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no ids are known
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Extend<RecordId> for IdentitySet {
    fn extend<I: IntoIterator<Item = RecordId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<RecordId> for IdentitySet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Union of the ids found in every source
///
/// Missing sources contribute nothing; a source that exists but cannot be
/// read fails the whole derivation.
pub fn derive_identity_set<S: IdentitySource>(sources: &[S]) -> Result<IdentitySet, S::Error> {
    let mut set = IdentitySet::new();
    for source in sources {
        set.extend(source.load_ids()?);
    }
    Ok(set)
}
