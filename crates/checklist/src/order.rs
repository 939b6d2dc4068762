//! Presentation ordering for item collections.
//!
//! Displayed sequences keep every incomplete item ahead of every complete
//! one; within each partition the pre-existing relative order is
//! preserved. [`sort_items`] is the single place that enforces this;
//! callers reapply it after every fetch and after every mutation that can
//! change a completion flag.

use crate::TodoItem;
use std::cmp::Ordering;

/// Comparator over items: incomplete before complete, equal otherwise.
///
/// Equal-compare pairs rely on the caller using a stable sort, which
/// [`sort_items`] does.
pub fn completion_order(a: &TodoItem, b: &TodoItem) -> Ordering {
    a.is_complete.cmp(&b.is_complete)
}

/// Stable-sort a collection into presentation order.
pub fn sort_items(items: &mut [TodoItem]) {
    // slice::sort_by is stable
    items.sort_by(completion_order);
}

/// True when every incomplete item precedes every complete item.
pub fn is_presentation_ordered(items: &[TodoItem]) -> bool {
    items.windows(2).all(|w| !w[0].is_complete || w[1].is_complete)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, complete: bool) -> TodoItem {
        TodoItem::new(id, "l1", id).completed(complete)
    }

    fn ids(items: &[TodoItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_incomplete_before_complete() {
        let mut items = vec![item("a", true), item("b", false), item("c", true)];
        sort_items(&mut items);
        assert_eq!(ids(&items), vec!["b", "a", "c"]);
        assert!(is_presentation_ordered(&items));
    }

    #[test]
    fn test_stability_within_partitions() {
        let mut items = vec![
            item("a", false),
            item("b", true),
            item("c", false),
            item("d", true),
            item("e", false),
        ];
        sort_items(&mut items);
        // Fetch order preserved inside each partition
        assert_eq!(ids(&items), vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_already_ordered_is_untouched() {
        let mut items = vec![item("a", false), item("b", false), item("c", true)];
        let before = items.clone();
        sort_items(&mut items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_empty_and_singleton() {
        let mut empty: Vec<TodoItem> = vec![];
        sort_items(&mut empty);
        assert!(is_presentation_ordered(&empty));

        let mut one = vec![item("a", true)];
        sort_items(&mut one);
        assert!(is_presentation_ordered(&one));
    }

    #[test]
    fn test_is_presentation_ordered_detects_violation() {
        let items = vec![item("a", true), item("b", false)];
        assert!(!is_presentation_ordered(&items));
    }

    #[test]
    fn test_comparator_matches_flag() {
        let i = item("a", false);
        let c = item("b", true);
        assert_eq!(completion_order(&i, &c), Ordering::Less);
        assert_eq!(completion_order(&c, &i), Ordering::Greater);
        assert_eq!(completion_order(&i, &i), Ordering::Equal);
    }
}
