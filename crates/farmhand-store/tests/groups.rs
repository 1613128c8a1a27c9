use farmhand_core::domain::GroupKind;
use farmhand_store::repo::{BuyerNew, GroupNew};
use farmhand_store::Store;

#[test]
fn group_create_list_delete() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let group = store
        .groups()
        .create(
            now,
            GroupNew {
                name: "Spring Campaign".to_string(),
                description: Some("Buyers for the spring mailer".to_string()),
                ..Default::default()
            },
        )
        .expect("create group");
    assert_eq!(group.kind, GroupKind::Manual);

    store
        .groups()
        .create(
            now,
            GroupNew {
                name: "Austin Investors".to_string(),
                kind: GroupKind::parse("rule"),
                criteria: Some(r#"{"tags":["investor"],"locations":["austin"]}"#.to_string()),
                ..Default::default()
            },
        )
        .expect("create group");

    let names: Vec<String> = store
        .groups()
        .list_all()
        .expect("list")
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(names, vec!["Austin Investors", "Spring Campaign"]);

    store.groups().delete(group.id).expect("delete");
    assert!(store.groups().get(group.id).expect("get").is_none());
}

#[test]
fn membership_add_remove_and_count() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let group = store
        .groups()
        .create(
            now,
            GroupNew {
                name: "Hot List".to_string(),
                ..Default::default()
            },
        )
        .expect("create group");

    let mut buyer_ids = Vec::new();
    for i in 0..3 {
        let buyer = store
            .buyers()
            .create(
                now + i,
                BuyerNew {
                    fname: Some(format!("Buyer {i}")),
                    ..Default::default()
                },
            )
            .expect("create buyer");
        buyer_ids.push(buyer.id);
    }

    let added = store
        .groups()
        .add_buyers(&buyer_ids, &[group.id])
        .expect("add buyers");
    assert_eq!(added, 3);

    // Re-adding the same pairs is ignored, not an error.
    let added = store
        .groups()
        .add_buyers(&buyer_ids, &[group.id])
        .expect("re-add buyers");
    assert_eq!(added, 0);

    assert_eq!(store.groups().member_count(group.id).expect("count"), 3);
    assert_eq!(store.groups().member_ids(group.id).expect("ids").len(), 3);

    store
        .groups()
        .remove_buyer(buyer_ids[0], group.id)
        .expect("remove");
    assert_eq!(store.groups().member_count(group.id).expect("count"), 2);

    let names = store
        .groups()
        .names_for_buyer(buyer_ids[1])
        .expect("names for buyer");
    assert_eq!(names, vec!["Hot List".to_string()]);
}

#[test]
fn deleting_a_buyer_cascades_membership() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let group = store
        .groups()
        .create(
            now,
            GroupNew {
                name: "Cascade".to_string(),
                ..Default::default()
            },
        )
        .expect("create group");
    let buyer = store
        .buyers()
        .create(now, BuyerNew::default())
        .expect("create buyer");
    store
        .groups()
        .add_buyers(&[buyer.id], &[group.id])
        .expect("add");

    store.buyers().delete(buyer.id).expect("delete buyer");
    assert_eq!(store.groups().member_count(group.id).expect("count"), 0);
}
