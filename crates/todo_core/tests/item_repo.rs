use rusqlite::Connection;
use todo_core::db::migrations::latest_version;
use todo_core::db::open_db_in_memory;
use todo_core::{Item, ItemRepository, RepoError, SqliteItemRepository};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::new("first item").unwrap();
    let id = repo.create_item(&item).unwrap();

    let loaded = repo.get_item(id).unwrap().unwrap();
    assert_eq!(loaded, item);
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    assert!(repo.get_item(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    // Later ids and earlier timestamps must not reorder the list.
    let c = fixed_item("00000000-0000-4000-8000-000000000003", "c", 300);
    let a = fixed_item("00000000-0000-4000-8000-000000000001", "a", 100);
    let b = fixed_item("00000000-0000-4000-8000-000000000002", "b", 200);
    repo.create_item(&c).unwrap();
    repo.create_item(&a).unwrap();
    repo.create_item(&b).unwrap();

    let texts: Vec<String> = repo
        .list_items()
        .unwrap()
        .into_iter()
        .map(|item| item.text)
        .collect();
    assert_eq!(texts, ["c", "a", "b"]);
}

#[test]
fn insertion_order_survives_deleting_the_last_item() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let a = Item::new("a").unwrap();
    let b = Item::new("b").unwrap();
    repo.create_item(&a).unwrap();
    repo.create_item(&b).unwrap();
    repo.delete_item(b.id).unwrap();
    let c = Item::new("c").unwrap();
    repo.create_item(&c).unwrap();

    let ids: Vec<_> = repo.list_items().unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, [a.id, c.id]);
}

#[test]
fn duplicate_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::new("once").unwrap();
    repo.create_item(&item).unwrap();
    let err = repo.create_item(&item).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn set_completed_updates_only_the_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::new("toggle me").unwrap();
    repo.create_item(&item).unwrap();
    repo.set_completed(item.id, true).unwrap();

    let loaded = repo.get_item(item.id).unwrap().unwrap();
    assert!(loaded.is_completed);
    assert_eq!(loaded.text, item.text);
    assert_eq!(loaded.timestamp, item.timestamp);
}

#[test]
fn set_completed_on_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let id = Uuid::new_v4();
    let err = repo.set_completed(id, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn delete_removes_row_and_reports_absence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::new("short lived").unwrap();
    repo.create_item(&item).unwrap();

    assert!(repo.delete_item(item.id).unwrap());
    assert!(!repo.delete_item(item.id).unwrap());
    assert!(repo.get_item(item.id).unwrap().is_none());
    assert!(repo.list_items().unwrap().is_empty());
}

#[test]
fn invalid_items_are_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut item = Item::new("valid").unwrap();
    item.text = "  ".to_string();
    let err = repo.create_item(&item).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn corrupt_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO items (id, text, timestamp, is_completed, seq)
         VALUES ('not-a-uuid', 'broken', 0, 0, 1);",
        [],
    )
    .unwrap();

    let err = repo.list_items().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_items_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("items"))
    ));
}

#[test]
fn repository_rejects_connection_missing_items_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE items (
            id TEXT PRIMARY KEY NOT NULL,
            text TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            seq INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "items",
            column: "is_completed"
        })
    ));
}

fn fixed_item(id: &str, text: &str, timestamp: i64) -> Item {
    Item::with_id(Uuid::parse_str(id).unwrap(), text, timestamp).unwrap()
}
