//! Display order derivation.

use crate::model::item::{Item, ItemId};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Stable partition of `items`: incomplete first, completed after.
///
/// Relative order inside each group is the order given by the store.
pub fn display_order(items: &[Item]) -> Vec<&Item> {
    let (mut incomplete, completed): (Vec<&Item>, Vec<&Item>) =
        items.iter().partition(|item| !item.is_completed);
    incomplete.extend(completed);
    incomplete
}

/// Render-ready projection of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    pub id: ItemId,
    pub text: String,
    /// Creation date, date-only granularity.
    pub date_label: String,
    pub is_completed: bool,
}

impl RowModel {
    pub fn from_item<Tz>(item: &Item, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: item.id,
            text: item.text.clone(),
            date_label: date_label(item.timestamp, tz),
            is_completed: item.is_completed,
        }
    }
}

/// Builds rows in display order.
pub fn display_rows<Tz>(items: &[Item], tz: &Tz) -> Vec<RowModel>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    display_order(items)
        .into_iter()
        .map(|item| RowModel::from_item(item, tz))
        .collect()
}

/// Formats an epoch-millisecond timestamp as `YYYY-MM-DD` in `tz`.
pub fn date_label<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || "----------".to_string(),
        |utc| utc.with_timezone(tz).format(DATE_LABEL_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::{date_label, display_order, display_rows};
    use crate::model::item::Item;
    use chrono::{FixedOffset, Utc};
    use uuid::Uuid;

    fn item(text: &str, is_completed: bool) -> Item {
        let mut item = Item::with_id(Uuid::new_v4(), text, 1_700_000_000_000).unwrap();
        item.is_completed = is_completed;
        item
    }

    fn texts(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.text.clone()).collect()
    }

    #[test]
    fn incomplete_items_precede_completed_ones() {
        let items = vec![item("A", false), item("B", true), item("C", false)];
        assert_eq!(texts(&display_order(&items)), ["A", "C", "B"]);
    }

    #[test]
    fn partition_is_stable_within_each_group() {
        let items = vec![
            item("done-1", true),
            item("open-1", false),
            item("done-2", true),
            item("open-2", false),
            item("open-3", false),
        ];
        assert_eq!(
            texts(&display_order(&items)),
            ["open-1", "open-2", "open-3", "done-1", "done-2"]
        );
    }

    #[test]
    fn empty_collection_yields_no_rows() {
        assert!(display_order(&[]).is_empty());
    }

    #[test]
    fn date_label_is_date_only_in_requested_zone() {
        // 2023-11-14T22:13:20Z
        assert_eq!(date_label(1_700_000_000_000, &Utc), "2023-11-14");
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(date_label(1_700_000_000_000, &plus_three), "2023-11-15");
    }

    #[test]
    fn display_rows_carry_completion_and_date() {
        let items = vec![item("B", true), item("A", false)];
        let rows = display_rows(&items, &Utc);
        assert_eq!(rows[0].text, "A");
        assert!(!rows[0].is_completed);
        assert_eq!(rows[1].text, "B");
        assert!(rows[1].is_completed);
        assert_eq!(rows[1].date_label, "2023-11-14");
    }
}
