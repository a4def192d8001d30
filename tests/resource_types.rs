//! Resource type creation and listing tests

use relic::{
    bootstrap, clear_all, create_resource_type, get_resource_type, init, list_resource_types,
    test_lock, StoreError,
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
fn create_assigns_fresh_unique_ids() {
    let _lock = setup();

    let a = create_resource_type(API_USER, "altbible").unwrap();
    let b = create_resource_type(API_USER, "gazetteer").unwrap();
    assert_ne!(a.resourcetype_id, b.resourcetype_id);
    assert!(b.resourcetype_id > a.resourcetype_id);
    assert_eq!(a.resource_type, "altbible");
    assert_eq!(a.created_by, API_USER);

    // Both listable in Active state
    let all = list_resource_types(None).unwrap();
    assert!(all.iter().any(|t| t.resourcetype_id == a.resourcetype_id));
    assert!(all.iter().any(|t| t.resourcetype_id == b.resourcetype_id));
}

#[test]
fn name_with_internal_whitespace_rejected() {
    let _lock = setup();

    let result = create_resource_type(API_USER, "Bible Contents");
    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(result.unwrap_err().label(), "Input Validation Error");
}

#[test]
fn empty_name_rejected() {
    let _lock = setup();

    let result = create_resource_type(API_USER, "");
    assert!(matches!(result, Err(StoreError::Validation(_))));
}

#[test]
fn tab_and_newline_count_as_whitespace() {
    let _lock = setup();

    assert!(create_resource_type(API_USER, "alt\tbible").is_err());
    assert!(create_resource_type(API_USER, "alt\nbible").is_err());
}

#[test]
fn duplicate_active_name_conflicts() {
    let _lock = setup();

    create_resource_type(API_USER, "altbible").unwrap();
    let result = create_resource_type(API_USER, "altbible");
    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert_eq!(result.unwrap_err().label(), "Conflict");
}

#[test]
fn names_are_case_sensitive() {
    let _lock = setup();

    create_resource_type(API_USER, "altbible").unwrap();
    // Different case is a different name
    create_resource_type(API_USER, "AltBible").unwrap();
    assert_eq!(list_resource_types(Some("altbible")).unwrap().len(), 1);
    assert_eq!(list_resource_types(Some("AltBible")).unwrap().len(), 1);
}

#[test]
fn seed_provides_default_types() {
    let _lock = setup();

    let all = list_resource_types(None).unwrap();
    for name in bootstrap::DEFAULT_RESOURCE_TYPES {
        assert!(
            all.iter().any(|t| t.resource_type == *name),
            "missing default type {}",
            name
        );
    }
}

#[test]
fn seed_is_idempotent() {
    let _lock = setup();

    let before = list_resource_types(None).unwrap().len();
    bootstrap::seed(SUPER_USER, SUPER_PASSWORD).unwrap();
    bootstrap::seed(SUPER_USER, SUPER_PASSWORD).unwrap();
    assert_eq!(list_resource_types(None).unwrap().len(), before);
}

#[test]
fn seed_recovers_from_a_partial_run() {
    let _lock = test_lock();
    let dir = TEST_DIR.get_or_init(|| TempDir::new().unwrap());
    init(dir.path().to_str().unwrap()).unwrap();
    clear_all().unwrap();

    // An earlier run died after creating a default type but before
    // setting the seeded flag
    create_resource_type(SUPER_USER, "bible").unwrap();

    bootstrap::seed(SUPER_USER, SUPER_PASSWORD).unwrap();

    let all = list_resource_types(None).unwrap();
    for name in bootstrap::DEFAULT_RESOURCE_TYPES {
        assert_eq!(
            all.iter().filter(|t| t.resource_type == *name).count(),
            1,
            "default type {} missing or duplicated",
            name
        );
    }
}

#[test]
fn filter_matches_exactly_or_not_at_all() {
    let _lock = setup();

    create_resource_type(API_USER, "altbible").unwrap();

    let hit = list_resource_types(Some("altbible")).unwrap();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].resource_type, "altbible");

    // No partial matching
    assert!(list_resource_types(Some("bib")).unwrap().is_empty());
    assert!(list_resource_types(Some("alt")).unwrap().is_empty());
    assert!(list_resource_types(Some("altbibles")).unwrap().is_empty());
}

#[test]
fn get_unknown_id_returns_none() {
    let _lock = setup();

    assert!(get_resource_type(9999).unwrap().is_none());
}
