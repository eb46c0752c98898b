use std::collections::BTreeSet;

use crate::engine::types::{PurchaseRecord, SpinRecord, UnifiedKey};

/// Distinct union of (hour, user_id) keys seen in either stream.
///
/// Driving the join from this set is what keeps purchase-only and spin-only
/// hours from producing rows with missing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    keys: BTreeSet<UnifiedKey>,
}

impl KeySpace {
    pub fn unify(spins: &[SpinRecord], purchases: &[PurchaseRecord]) -> Self {
        let keys = spins
            .iter()
            .map(SpinRecord::key)
            .chain(purchases.iter().map(PurchaseRecord::key))
            .collect();
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &UnifiedKey) -> bool {
        self.keys.contains(key)
    }

    /// Ascending by user, then hour.
    pub fn iter(&self) -> impl Iterator<Item = &UnifiedKey> {
        self.keys.iter()
    }
}
