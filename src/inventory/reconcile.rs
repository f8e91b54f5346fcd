//! Per-tick reconciliation of detection counts against the stored counters.
//!
//! Counts are difference-driven: the engine only sees that N more or fewer
//! regions of a color are visible in a view than last tick, never which object
//! moved. Detector flicker therefore reads as a real removal or return, and
//! `in_use` can drift or go negative. Both are kept as is.

use crate::inventory::counters::{InventoryCounters, saturating_count};
use crate::inventory::detection::DetectionResult;
use crate::inventory::event_log::LogEntry;
use crate::inventory::store::InventoryStore;

/// Apply one tick of field and discard detections to every tracked class.
///
/// Per class, the field rule runs before the discard rule, and the discard
/// rule sees the `in_use` value the field rule just wrote. Classes missing
/// from a result count as zero detections in that view. Entries come back in
/// creation order.
pub fn reconcile(
    store: &mut InventoryStore,
    field: &DetectionResult,
    discard: &DetectionResult,
) -> Vec<LogEntry> {
    let mut entries = Vec::new();

    for (class, counters) in store.iter_mut() {
        let field_count = saturating_count(field.count(class));
        let discard_count = saturating_count(discard.count(class));

        if let Some(entry) = apply_field_count(class, counters, field_count) {
            entries.push(entry);
        }
        if let Some(entry) = apply_discard_count(class, counters, discard_count) {
            entries.push(entry);
        }
    }

    entries
}

fn apply_field_count(
    class: &str,
    counters: &mut InventoryCounters,
    field_count: u32,
) -> Option<LogEntry> {
    if field_count == counters.in_field {
        return None;
    }

    // positive: objects left the field
    let delta = i64::from(counters.in_field) - i64::from(field_count);
    counters.in_use += delta;
    counters.in_field = field_count;

    let direction = if delta > 0 {
        "removed from"
    } else {
        "returned to"
    };
    Some(LogEntry::new(format!(
        "{class}: {} {direction} tool field. In field: {field_count}, In use: {}",
        delta.abs(),
        counters.in_use
    )))
}

fn apply_discard_count(
    class: &str,
    counters: &mut InventoryCounters,
    discard_count: u32,
) -> Option<LogEntry> {
    // never corrected downward
    if discard_count <= counters.discarded {
        return None;
    }

    let delta = discard_count - counters.discarded;
    counters.in_use -= i64::from(delta);
    counters.discarded = discard_count;

    Some(LogEntry::new(format!(
        "{class}: {delta} discarded. In use: {}, Discarded: {discard_count}",
        counters.in_use
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::region::Region;

    fn boxes(n: u32) -> Vec<Region> {
        (0..n).map(|i| Region::new(i * 40, 0, 30, 30)).collect()
    }

    fn store_with(class: &str, n: u32) -> InventoryStore {
        let mut store = InventoryStore::new();
        store.initialize(&DetectionResult::new().with(class, boxes(n)));
        store
    }

    #[test]
    fn test_removal_from_field() {
        let mut store = store_with("A", 3);

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(2)),
            &DetectionResult::new().with("A", vec![]),
        );

        let counters = store.get("A").copied().unwrap();
        assert_eq!((counters.in_field, counters.in_use, counters.discarded), (2, 1, 0));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.contains("removed from tool field"));
        assert!(entries[0].message.contains("In field: 2"));
        assert_eq!(
            entries[0].message,
            "A: 1 removed from tool field. In field: 2, In use: 1"
        );
    }

    #[test]
    fn test_discard_after_removal() {
        let mut store = store_with("A", 3);
        reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(2)),
            &DetectionResult::new(),
        );

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(2)),
            &DetectionResult::new().with("A", boxes(1)),
        );

        let counters = store.get("A").copied().unwrap();
        assert_eq!((counters.in_field, counters.in_use, counters.discarded), (2, 0, 1));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "A: 1 discarded. In use: 0, Discarded: 1");
        assert!(counters.is_settled());
    }

    #[test]
    fn test_return_to_field() {
        let mut store = store_with("A", 3);
        reconcile(&mut store, &DetectionResult::new(), &DetectionResult::new());

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(2)),
            &DetectionResult::new(),
        );

        assert_eq!(
            entries[0].message,
            "A: 2 returned to tool field. In field: 2, In use: 1"
        );
    }

    #[test]
    fn test_no_change_emits_nothing() {
        let mut store = store_with("A", 3);
        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(3)),
            &DetectionResult::new(),
        );
        assert!(entries.is_empty());
        assert_eq!(store.get("A"), Some(&InventoryCounters::baseline(3)));
    }

    #[test]
    fn test_discard_count_never_decreases() {
        let mut store = store_with("A", 2);
        let field = DetectionResult::new().with("A", boxes(2));

        reconcile(&mut store, &field, &DetectionResult::new().with("A", boxes(2)));
        let entries = reconcile(&mut store, &field, &DetectionResult::new());

        assert!(entries.is_empty());
        assert_eq!(store.get("A").map(|c| c.discarded), Some(2));
    }

    #[test]
    fn test_in_use_goes_negative_without_clamping() {
        let mut store = store_with("A", 2);

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(2)),
            &DetectionResult::new().with("A", boxes(1)),
        );

        assert_eq!(store.get("A").map(|c| c.in_use), Some(-1));
        assert_eq!(entries[0].message, "A: 1 discarded. In use: -1, Discarded: 1");
    }

    #[test]
    fn test_field_rule_feeds_discard_rule_in_same_tick() {
        let mut store = store_with("A", 3);

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(1)),
            &DetectionResult::new().with("A", boxes(1)),
        );

        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "A: 2 removed from tool field. In field: 1, In use: 2",
                "A: 1 discarded. In use: 1, Discarded: 1",
            ]
        );
    }

    #[test]
    fn test_untracked_classes_are_ignored() {
        let mut store = store_with("A", 1);

        let entries = reconcile(
            &mut store,
            &DetectionResult::new().with("A", boxes(1)).with("B", boxes(4)),
            &DetectionResult::new().with("B", boxes(2)),
        );

        assert!(entries.is_empty());
        assert!(store.get("B").is_none());
    }
}
