mod support;

use std::io::Write;
use todo_api::StorageError;
use todo_api::query::{Filter, FindOptions};
use todo_api::store::{MemoryTodoStore, TodoCollection, load_seed_file};

#[tokio::test]
async fn seeds_from_file_and_serves_them() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"_id": "58895985a22c04e761776d54", "owner": "Blanche", "status": false, "body": "In sunt ex non", "category": "software design"}},
            {{"owner": "Fry", "status": true, "body": "Ipsum esse est", "category": "video games"}}
        ]"#
    )
    .unwrap();

    let store = MemoryTodoStore::new("todos");
    assert_eq!(store.seed(load_seed_file(file.path()).unwrap()).unwrap(), 2);
    let all = store.find(&Filter::True, &FindOptions::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id.to_hex(), "58895985a22c04e761776d54");
    assert_eq!(all[1].owner, "Fry");
}

#[test]
fn missing_seed_file_is_a_seed_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_seed_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StorageError::Seed(_)));
}

#[test]
fn reseeding_the_same_ids_is_rejected() {
    let store = support::fixture();
    let json = format!(
        r#"[{{"_id": "{}", "owner": "Elena", "status": true, "body": "again", "category": "homework"}}]"#,
        support::ELENA_ID
    );
    let err = store.seed(todo_api::store::parse_seed(&json).unwrap()).unwrap_err();
    assert!(matches!(err, StorageError::DuplicateId(id) if id == support::ELENA_ID));
    assert_eq!(store.len(), 4);
}

#[test]
fn bundled_seed_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("seed/todos.json");
    let store = MemoryTodoStore::new("todos");
    assert_eq!(store.seed(load_seed_file(&path).unwrap()).unwrap(), store.len());
    assert!(!store.is_empty());
}
