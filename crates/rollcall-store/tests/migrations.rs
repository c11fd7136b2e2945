use rollcall_store::Store;

#[test]
fn migrations_are_idempotent() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version"), 0);
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");
    assert_eq!(store.schema_version().expect("version"), 1);
}
