mod common;

use common::MockStore;
use reco_sync::reconcile::ensure_properties;
use reco_sync::schema::{ITEM_PROFILE, USER_PROFILE};
use reco_sync::store::{EntityKind, Operation, PropertyInfo};

#[test]
fn creates_every_missing_property_in_one_batch() {
    let store = MockStore::new();
    let desired = ITEM_PROFILE.desired_properties();

    ensure_properties(&store, EntityKind::Item, &desired).unwrap();

    let batches = store.batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].0, EntityKind::Item);
    assert_eq!(batches[0].1.len(), desired.len());
    assert!(batches[0]
        .1
        .iter()
        .all(|op| matches!(op, Operation::CreateProperty { .. })));
}

#[test]
fn second_run_submits_nothing() {
    let store = MockStore::new();
    let desired = USER_PROFILE.desired_properties();

    ensure_properties(&store, EntityKind::User, &desired).unwrap();
    ensure_properties(&store, EntityKind::User, &desired).unwrap();

    // At most one create batch across both calls combined.
    assert_eq!(store.batches.borrow().len(), 1);
}

#[test]
fn fully_registered_schema_makes_no_network_call() {
    let existing = ITEM_PROFILE
        .desired_properties()
        .iter()
        .map(|property| PropertyInfo {
            name: property.name.to_string(),
            data_type: property.data_type.wire_name().to_string(),
        })
        .collect();
    let store = MockStore::with_properties(existing);

    ensure_properties(&store, EntityKind::Item, &ITEM_PROFILE.desired_properties()).unwrap();

    assert!(store.batches.borrow().is_empty());
}

#[test]
fn type_conflicts_warn_without_queueing_operations() {
    let mut existing: Vec<PropertyInfo> = ITEM_PROFILE
        .desired_properties()
        .iter()
        .map(|property| PropertyInfo {
            name: property.name.to_string(),
            data_type: property.data_type.wire_name().to_string(),
        })
        .collect();
    // Remote disagrees about num_pages; the run must continue without
    // attempting to retype it.
    existing
        .iter_mut()
        .find(|property| property.name == "num_pages")
        .unwrap()
        .data_type = "string".to_string();
    let store = MockStore::with_properties(existing);

    ensure_properties(&store, EntityKind::Item, &ITEM_PROFILE.desired_properties()).unwrap();

    assert!(store.batches.borrow().is_empty());
}

#[test]
fn listing_failure_is_treated_as_an_empty_remote_set() {
    let store = MockStore::new();
    store.fail_listing.set(true);
    let desired = USER_PROFILE.desired_properties();

    ensure_properties(&store, EntityKind::User, &desired).unwrap();

    let batches = store.batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].1.len(), desired.len());
}
