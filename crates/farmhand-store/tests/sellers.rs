use farmhand_store::repo::SellerNew;
use farmhand_store::Store;

#[test]
fn seller_create_and_list_by_name() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    store
        .sellers()
        .create(
            now,
            SellerNew {
                name: "Robert Johnson".to_string(),
                email: Some("robert@example.com".to_string()),
                score: 88,
                property_address: Some("456 Oak Street".to_string()),
                asking_price: Some(650_000),
                timeline: Some("3 months".to_string()),
                status: Some("Ready to List".to_string()),
                tags: vec!["Motivated".to_string(), "Relocating".to_string()],
                ..Default::default()
            },
        )
        .expect("create seller");
    store
        .sellers()
        .create(
            now,
            SellerNew {
                name: "Alice Becker".to_string(),
                ..Default::default()
            },
        )
        .expect("create seller");

    let sellers = store.sellers().list_all().expect("list");
    let names: Vec<_> = sellers.iter().map(|seller| seller.name.as_str()).collect();
    assert_eq!(names, vec!["Alice Becker", "Robert Johnson"]);
    assert_eq!(sellers[1].asking_price, Some(650_000));
    assert_eq!(sellers[1].tags.len(), 2);
}
