use serde::{Deserialize, Serialize};

/// Inventory counts for one tracked class.
///
/// `total` is fixed at initialization and acts as a ceiling for the other
/// three fields. `in_use` is a derived, signed balance: discard events that
/// outpace field removals drive it negative, and that value is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryCounters {
    /// Objects known to exist
    pub total: u32,
    /// Objects currently visible in the field view
    pub in_field: u32,
    /// Objects out of the field and not yet discarded
    pub in_use: i64,
    /// Objects ever seen in the discard view
    pub discarded: u32,
}

impl InventoryCounters {
    /// Fresh counters with every object in the field.
    pub fn baseline(count: u32) -> Self {
        Self {
            total: count,
            in_field: count,
            in_use: 0,
            discarded: 0,
        }
    }

    /// Whether `in_field + in_use + discarded == total`.
    pub fn is_settled(&self) -> bool {
        i64::from(self.in_field) + self.in_use + i64::from(self.discarded) == i64::from(self.total)
    }
}

/// Detection count as a counter value, saturating at `u32::MAX`.
pub(crate) fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
