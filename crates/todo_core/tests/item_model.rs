use todo_core::{Item, ItemValidationError};
use uuid::Uuid;

#[test]
fn item_new_sets_defaults() {
    let item = Item::new("  Buy milk  ").unwrap();

    assert!(!item.id.is_nil());
    assert_eq!(item.text, "Buy milk");
    assert!(!item.is_completed);
    assert!(item.timestamp > 0);
}

#[test]
fn item_new_rejects_blank_text() {
    assert_eq!(Item::new("").unwrap_err(), ItemValidationError::EmptyText);
    assert_eq!(Item::new(" \t\n").unwrap_err(), ItemValidationError::EmptyText);
}

#[test]
fn fresh_items_get_distinct_ids() {
    let first = Item::new("one").unwrap();
    let second = Item::new("one").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Item::with_id(Uuid::nil(), "invalid", 0).unwrap_err();
    assert_eq!(err, ItemValidationError::NilId);
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let item_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut item = Item::with_id(item_id, "Walk dog", 1_700_000_000_000).unwrap();
    item.is_completed = true;

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], item_id.to_string());
    assert_eq!(json["text"], "Walk dog");
    assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    assert_eq!(json["is_completed"], true);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_rejects_blank_text() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "   ",
        "timestamp": 0,
        "is_completed": false
    });

    let err = serde_json::from_value::<Item>(value).unwrap_err();
    assert!(
        err.to_string().contains("item text must not be empty"),
        "unexpected error: {err}"
    );
}
