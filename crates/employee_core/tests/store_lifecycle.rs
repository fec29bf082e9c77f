use employee_core::db::schema::{table_exists, EMPLOYEE_TABLE};
use employee_core::{EmployeeStore, StoreConfig, StoreErrorKind, DEFAULT_DB_FILE_NAME};
use std::time::Duration;

#[test]
fn new_store_does_not_touch_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazy.db");

    let store = EmployeeStore::new(StoreConfig::file(&path));

    assert!(!store.is_connected());
    assert!(!path.exists());
}

#[test]
fn connect_creates_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EmployeeStore::new(StoreConfig::in_dir(dir.path()));

    store.connect().unwrap();
    assert!(store.is_connected());
    assert!(dir.path().join(DEFAULT_DB_FILE_NAME).exists());

    // A temp table lives only on its own connection, so it survives only if
    // the second call reuses the first handle.
    store
        .connect()
        .unwrap()
        .execute_batch("CREATE TEMP TABLE marker (x INTEGER);")
        .unwrap();
    let conn = store.connect().unwrap();
    let marker_visible: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_temp_master WHERE name = 'marker';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(marker_visible, 1);
}

#[test]
fn connect_failure_is_reported_and_store_stays_unconnected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("store.db");
    let mut store = EmployeeStore::new(StoreConfig::file(&path));

    let err = store.connect().unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Connection);
    assert!(!store.is_connected());

    let err = store.ensure_schema().unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Connection);

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    store.connect().unwrap();
    assert!(store.is_connected());
}

#[test]
fn probe_reads_user_version() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    assert_eq!(store.probe().unwrap(), 0);
    assert!(store.is_connected());
}

#[test]
fn ensure_schema_twice_creates_one_table() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    store.ensure_schema().unwrap();
    store.ensure_schema().unwrap();

    let conn = store.connect().unwrap();
    assert!(table_exists(conn, EMPLOYEE_TABLE).unwrap());
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [EMPLOYEE_TABLE],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn rows_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path()).with_busy_timeout(Duration::from_millis(250));

    let id = {
        let mut store = EmployeeStore::new(config.clone());
        store.ensure_schema().unwrap();
        store.insert("Ana", "2500.00", "Analista").unwrap()
    };

    let mut reopened = EmployeeStore::new(config);
    reopened.ensure_schema().unwrap();
    let rows = reopened.find_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(reopened.config().busy_timeout, Duration::from_millis(250));
}
