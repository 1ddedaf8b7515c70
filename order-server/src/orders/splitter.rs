//! Order splitter
//!
//! Groups submitted line items by category. Items whose product id has no
//! category are silently dropped from every group: a documented policy
//! inherited from the classifier, not an error.

use shared::models::{Category, OrderItem};

use super::classifier::classify;

/// Split items into per-category groups
///
/// Group order is the first-seen order of categories in the raw item
/// list; downstream sub-order numbering (`-P1`, `-P2`, …) depends on it.
pub fn split(items: &[OrderItem]) -> Vec<(Category, Vec<OrderItem>)> {
    let mut groups: Vec<(Category, Vec<OrderItem>)> = Vec::new();

    for item in items {
        let Some(category) = classify(item.id) else {
            continue;
        };
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, group)) => group.push(item.clone()),
            None => groups.push((category, vec![item.clone()])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::items_total;

    fn item(id: i64, qty: u32, price: f64) -> OrderItem {
        OrderItem {
            id,
            name: format!("item-{id}"),
            quantity: qty,
            price,
        }
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let items = vec![
            item(65_000, 1, 10.0), // chemicals
            item(10_500, 1, 10.0), // cleaning
            item(65_001, 1, 10.0), // chemicals again
        ];
        let groups = split(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Chemicals);
        assert_eq!(groups[1].0, Category::Cleaning);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_partition_plus_drop_law() {
        let items = vec![
            item(10_001, 1, 1.0),
            item(99_999, 1, 1.0), // uncategorized, dropped
            item(20_001, 2, 2.0),
            item(10_002, 3, 3.0),
            item(5, 1, 1.0), // uncategorized, dropped
        ];
        let groups = split(&items);

        let grouped: usize = groups.iter().map(|(_, g)| g.len()).sum();
        let dropped = items.iter().filter(|i| classify(i.id).is_none()).count();
        assert_eq!(grouped + dropped, items.len());

        // No group contains an uncategorized item
        for (category, group) in &groups {
            for i in group {
                assert_eq!(classify(i.id), Some(*category));
            }
        }
    }

    #[test]
    fn test_group_subtotals_match() {
        let items = vec![
            item(10_001, 2, 1500.0),
            item(10_002, 1, 700.0),
            item(30_001, 4, 250.0),
        ];
        let groups = split(&items);
        let cleaning = &groups[0].1;
        let pet = &groups[1].1;
        assert_eq!(items_total(cleaning), 2.0 * 1500.0 + 700.0);
        assert_eq!(items_total(pet), 4.0 * 250.0);
    }

    #[test]
    fn test_all_uncategorized_yields_nothing() {
        let items = vec![item(1, 1, 1.0), item(99_999, 1, 1.0)];
        assert!(split(&items).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(split(&[]).is_empty());
    }
}
