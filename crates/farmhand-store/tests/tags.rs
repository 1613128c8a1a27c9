use farmhand_store::error::StoreErrorKind;
use farmhand_store::Store;

#[test]
fn upsert_is_idempotent_by_name() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let first = store
        .tags()
        .upsert(now, "Investor", Some("#AA0000"))
        .expect("upsert");
    let second = store.tags().upsert(now + 5, "Investor", None).expect("upsert");
    assert_eq!(first.id, second.id);
    assert_eq!(second.color, "#AA0000");

    let tags = store.tags().list_all().expect("list");
    assert_eq!(tags.len(), 1);
}

#[test]
fn list_orders_by_name() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    for name in ["wholesaler", "Cash Buyer", "investor"] {
        store.tags().upsert(now, name, None).expect("upsert");
    }

    let names: Vec<String> = store
        .tags()
        .list_all()
        .expect("list")
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, vec!["Cash Buyer", "investor", "wholesaler"]);
}

#[test]
fn delete_refuses_protected_tags() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let tag = store.tags().upsert(now, "VIP", None).expect("upsert");
    store
        .connection()
        .execute(
            "UPDATE tags SET is_protected = 1 WHERE id = ?1;",
            [tag.id.to_string()],
        )
        .expect("protect");

    let err = store.tags().delete("VIP").unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::ProtectedTag);

    store.tags().upsert(now, "plain", None).expect("upsert");
    store.tags().delete("plain").expect("delete");
    let err = store.tags().delete("plain").unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn usage_counter_floors_at_zero() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    store.tags().upsert(now, "cold", None).expect("upsert");
    store.tags().adjust_usage("cold", -5).expect("adjust");
    let tag = store
        .tags()
        .get_by_name("cold")
        .expect("get")
        .expect("exists");
    assert_eq!(tag.usage_count, 0);
}
