use employee_core::{ActionResponse, EmployeeStore, QueryResponse, StoreConfig, StoreErrorKind};

#[test]
fn insert_success_carries_id_and_tag() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());
    store.ensure_schema().unwrap();

    let response = ActionResponse::from_insert(store.insert("Ana", "2500", "Analista"));

    assert!(response.ok);
    assert_eq!(response.error_kind, None);
    let id = response.employee_id.unwrap();
    assert_eq!(response.message, format!("Employee {id} added."));
}

#[test]
fn failures_are_tagged_by_kind_not_by_message_text() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    let schema_missing = ActionResponse::from_insert(store.insert("Ana", "2500", "Analista"));
    assert!(!schema_missing.ok);
    assert_eq!(schema_missing.error_kind, Some(StoreErrorKind::Write));
    assert_eq!(schema_missing.employee_id, None);

    let invalid = ActionResponse::from_insert(store.insert("", "2500", "Analista"));
    assert_eq!(invalid.error_kind, Some(StoreErrorKind::Validation));
    assert!(invalid.message.contains("name cannot be empty"));

    let created = ActionResponse::from_unit(store.ensure_schema(), "Table ready.");
    assert!(created.ok);
    assert_eq!(created.message, "Table ready.");
}

#[test]
fn query_response_distinguishes_empty_from_failed() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    let failed = QueryResponse::from_query(store.find_all());
    assert!(!failed.ok);
    assert_eq!(failed.error_kind, Some(StoreErrorKind::Query));
    assert!(!failed.is_empty_success());

    store.ensure_schema().unwrap();
    let empty = QueryResponse::from_query(store.find_by_name_substring("zzz"));
    assert!(empty.is_empty_success());
    assert_eq!(empty.message, "No results.");

    store.insert("Ana", "2500", "Analista").unwrap();
    let found = QueryResponse::from_query(store.find_all());
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.message, "Found 1 result(s).");
}

#[test]
fn responses_serialize_with_stable_wire_fields() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());
    store.ensure_schema().unwrap();
    let id = store.insert("Ana", "2500.5", "Analista").unwrap();

    let json = serde_json::to_value(QueryResponse::from_query(store.find_all())).unwrap();
    assert_eq!(json["ok"], true);
    assert!(json["error_kind"].is_null());
    assert_eq!(json["items"][0]["id"], id);
    assert_eq!(json["items"][0]["name"], "Ana");
    assert_eq!(json["items"][0]["salary"], 2500.5);
    assert_eq!(json["items"][0]["role"], "Analista");

    let json =
        serde_json::to_value(ActionResponse::from_insert(store.insert("Ana", "x", "Analista")))
            .unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error_kind"], "validation");
}
