use farmhand_store::{paths, Store};
use tempfile::TempDir;

#[test]
fn migrations_run_and_report_version() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    assert!(store.schema_version().expect("version") >= 1);
}

#[test]
fn migrations_are_idempotent() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");
    assert!(store.schema_version().expect("version") >= 1);
}

#[test]
fn reopen_preserves_schema_version() {
    let temp = TempDir::new().expect("tempdir");
    let db_path = paths::db_path_in(temp.path());

    {
        let store = Store::open(&db_path).expect("open");
        store.migrate().expect("migrate");
    }

    let store = Store::open(&db_path).expect("reopen");
    assert!(store.schema_version().expect("version") >= 1);
}
