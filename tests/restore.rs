//! Restore tests: ledger consumption, verbatim reconstruction, conflicts

use relic::tx::transact;
use relic::{
    bootstrap, clear_all, create_resource_type, get_resource_type, init, list_resource_types,
    restore_item, soft_delete_resource_type, test_lock, DeletedItem, ResourceType, StoreError,
};
use std::sync::OnceLock;
use tempfile::TempDir;

static TEST_DIR: OnceLock<TempDir> = OnceLock::new();

const SUPER_USER: &str = "superadmin@relic.dev";
const SUPER_PASSWORD: &str = "J3sus-lives";
const API_USER: &str = "apiuser2@relic.dev";

fn setup() -> std::sync::MutexGuard<'static, ()> {
    let lock = test_lock();
    let dir = TEST_DIR.get_or_init(|| TempDir::new().unwrap());
    init(dir.path().to_str().unwrap()).unwrap();
    clear_all().unwrap();
    bootstrap::seed(SUPER_USER, SUPER_PASSWORD).unwrap();
    lock
}

#[test]
fn restore_reinserts_the_identical_record() {
    let _lock = setup();

    let rt = create_resource_type(API_USER, "altbible").unwrap();
    let item = soft_delete_resource_type(rt.resourcetype_id).unwrap();

    let restored = restore_item(item.item_id).unwrap();
    assert_eq!(restored, rt);

    // Original id preserved, listable again
    assert_eq!(get_resource_type(rt.resourcetype_id).unwrap().unwrap(), rt);
    let hit = list_resource_types(Some("altbible")).unwrap();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].resourcetype_id, rt.resourcetype_id);
}

#[test]
fn restore_unknown_item_is_not_found() {
    let _lock = setup();

    let result = restore_item(20000);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert_eq!(result.unwrap_err().label(), "Requested Content Not Available");
}

#[test]
fn restore_consumes_the_ledger_entry() {
    let _lock = setup();

    let rt = create_resource_type(API_USER, "altbible").unwrap();
    let item = soft_delete_resource_type(rt.resourcetype_id).unwrap();
    restore_item(item.item_id).unwrap();

    assert!(matches!(restore_item(item.item_id), Err(StoreError::NotFound(_))));
}

#[test]
fn restore_into_occupied_name_is_refused_and_keeps_entry() {
    let _lock = setup();

    let original = create_resource_type(API_USER, "altbible").unwrap();
    let item = soft_delete_resource_type(original.resourcetype_id).unwrap();

    // Someone re-creates the name while the snapshot sits in the ledger
    let replacement = create_resource_type(API_USER, "altbible").unwrap();
    assert_ne!(replacement.resourcetype_id, original.resourcetype_id);

    let result = restore_item(item.item_id);
    assert!(matches!(result, Err(StoreError::Conflict(_))));

    // Entry not consumed: free the name and the restore succeeds
    soft_delete_resource_type(replacement.resourcetype_id).unwrap();
    let restored = restore_item(item.item_id).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn restore_rejects_foreign_entity_kinds() {
    let _lock = setup();

    // A ledger entry tagged with a table this store cannot restore
    let item = DeletedItem {
        item_id: 777,
        entity_type: "resources".to_string(),
        record: ResourceType {
            resourcetype_id: 50,
            resource_type: "orphan".to_string(),
            created_by: API_USER.to_string(),
        },
    };
    transact(|tx| tx.put_deleted(&item)).unwrap();

    let result = restore_item(777);
    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(result.unwrap_err().label(), "Input Validation Error");
}

#[test]
fn delete_restore_cycle_never_reuses_item_ids() {
    let _lock = setup();

    let rt = create_resource_type(API_USER, "altbible").unwrap();
    let first = soft_delete_resource_type(rt.resourcetype_id).unwrap();
    restore_item(first.item_id).unwrap();
    let second = soft_delete_resource_type(rt.resourcetype_id).unwrap();

    assert!(second.item_id > first.item_id);
    assert_eq!(second.record, rt);
}

#[test]
fn deleted_entity_persists_until_restored() {
    let _lock = setup();

    let rt = create_resource_type(API_USER, "altbible").unwrap();
    let item = soft_delete_resource_type(rt.resourcetype_id).unwrap();

    // Unrelated churn does not disturb the ledger
    let other = create_resource_type(API_USER, "gazetteer").unwrap();
    soft_delete_resource_type(other.resourcetype_id).unwrap();

    let restored = restore_item(item.item_id).unwrap();
    assert_eq!(restored, rt);
}
