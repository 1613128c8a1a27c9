use farmhand_core::domain::BuyerStatus;
use farmhand_store::repo::{BuyerNew, BuyerUpdate};
use farmhand_store::Store;

#[test]
fn buyer_crud_roundtrip() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let buyer = store
        .buyers()
        .create(
            now,
            BuyerNew {
                fname: Some("John".to_string()),
                lname: Some("Smith".to_string()),
                email: Some("john@example.com".to_string()),
                score: 92,
                tags: vec!["Investor".to_string()],
                status: BuyerStatus::Qualified,
                ..Default::default()
            },
        )
        .expect("create buyer");

    let fetched = store
        .buyers()
        .get(buyer.id)
        .expect("get buyer")
        .expect("buyer exists");
    assert_eq!(fetched.display_name(), "John Smith");
    assert_eq!(fetched.score, 92);
    assert_eq!(fetched.tags, vec!["Investor".to_string()]);
    assert_eq!(fetched.status, BuyerStatus::Qualified);

    let updated = store
        .buyers()
        .update(
            now + 10,
            buyer.id,
            BuyerUpdate {
                email: Some(None),
                score: Some(60),
                status: Some(BuyerStatus::parse("nurturing")),
                ..Default::default()
            },
        )
        .expect("update buyer");
    assert!(updated.email.is_none());
    assert_eq!(updated.score, 60);
    assert_eq!(updated.status.as_str(), "nurturing");
    assert_eq!(updated.updated_at, now + 10);

    let reloaded = store
        .buyers()
        .get(buyer.id)
        .expect("get buyer")
        .expect("buyer exists");
    assert_eq!(reloaded, updated);

    store.buyers().delete(buyer.id).expect("delete buyer");
    assert!(store.buyers().get(buyer.id).expect("get buyer").is_none());
}

#[test]
fn list_all_orders_newest_first() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    for (offset, name) in [(0, "First"), (100, "Second"), (200, "Third")] {
        store
            .buyers()
            .create(
                now + offset,
                BuyerNew {
                    fname: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .expect("create buyer");
    }

    let buyers = store.buyers().list_all().expect("list");
    let names: Vec<_> = buyers
        .iter()
        .map(|buyer| buyer.fname.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[test]
fn insert_batch_is_atomic_per_batch() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let batch: Vec<BuyerNew> = (0..50)
        .map(|i| BuyerNew {
            fname: Some(format!("Buyer {i}")),
            ..Default::default()
        })
        .collect();
    let ids = store.buyers().insert_batch(now, batch).expect("batch");
    assert_eq!(ids.len(), 50);
    assert_eq!(store.buyers().list_all().expect("list").len(), 50);
}

#[test]
fn add_and_remove_tag_keep_usage_counts() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let buyer = store
        .buyers()
        .create(now, BuyerNew::default())
        .expect("create buyer");

    let tagged = store
        .buyers()
        .add_tag(now + 1, buyer.id, "Cash Buyer")
        .expect("add tag");
    assert_eq!(tagged.tags, vec!["Cash Buyer".to_string()]);

    let tag = store
        .tags()
        .get_by_name("Cash Buyer")
        .expect("get tag")
        .expect("tag exists");
    assert_eq!(tag.usage_count, 1);

    // Adding the same label again neither duplicates nor double-counts.
    let again = store
        .buyers()
        .add_tag(now + 2, buyer.id, "Cash Buyer")
        .expect("add tag again");
    assert_eq!(again.tags.len(), 1);
    let tag = store
        .tags()
        .get_by_name("Cash Buyer")
        .expect("get tag")
        .expect("tag exists");
    assert_eq!(tag.usage_count, 1);

    let removed = store
        .buyers()
        .remove_tag(now + 3, buyer.id, "Cash Buyer")
        .expect("remove tag");
    assert!(removed.tags.is_empty());
    let tag = store
        .tags()
        .get_by_name("Cash Buyer")
        .expect("get tag")
        .expect("tag exists");
    assert_eq!(tag.usage_count, 0);
}

#[test]
fn existing_emails_skips_null_rows() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    store
        .buyers()
        .create(
            now,
            BuyerNew {
                email: Some("a@example.com".to_string()),
                ..Default::default()
            },
        )
        .expect("create");
    store
        .buyers()
        .create(now, BuyerNew::default())
        .expect("create");

    let emails = store.buyers().existing_emails().expect("emails");
    assert_eq!(emails, vec!["a@example.com".to_string()]);
}
