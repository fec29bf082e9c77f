use employee_core::{
    Employee, EmployeeField, EmployeeStore, EmployeeValidationError, NewEmployee, StoreConfig,
    StoreError, StoreErrorKind,
};

fn ready_store() -> EmployeeStore {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());
    store.ensure_schema().unwrap();
    store
}

#[test]
fn insert_returns_id_and_find_all_returns_row() {
    let mut store = ready_store();

    let id = store.insert("Ana", "2500.00", "Analista").unwrap();

    let rows = store.find_all().unwrap();
    assert_eq!(
        rows,
        vec![Employee {
            id,
            name: "Ana".to_string(),
            salary: 2500.0,
            role: "Analista".to_string(),
        }]
    );
}

#[test]
fn invalid_fields_are_rejected_without_writing() {
    let mut store = ready_store();
    store.insert("Bruno", "1000", "Suporte").unwrap();

    let cases = [
        ("", "2500", "Analista", EmployeeField::Name),
        ("Ana", "2500", "   ", EmployeeField::Role),
        ("Ana", "abc", "Analista", EmployeeField::Salary),
        ("Ana", "", "Analista", EmployeeField::Salary),
        ("Ana", "-10", "Analista", EmployeeField::Salary),
    ];

    for (name, salary, role, field) in cases {
        let err = store.insert(name, salary, role).unwrap_err();
        match err {
            StoreError::Validation(inner) => assert_eq!(inner.field(), field),
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn validation_runs_before_connecting() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    let err = store.insert("Ana", "abc", "Analista").unwrap_err();

    assert_eq!(err.kind(), StoreErrorKind::Validation);
    assert!(!store.is_connected());
}

#[test]
fn sequential_inserts_yield_strictly_increasing_ids() {
    let mut store = ready_store();

    let ids = (0..20)
        .map(|n| {
            store
                .insert(&format!("Pessoa {n}"), &format!("{}", 1000 + n), "Analista")
                .unwrap()
        })
        .collect::<Vec<_>>();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(store.count().unwrap(), 20);
}

#[test]
fn insert_employee_accepts_typed_draft() {
    let mut store = ready_store();
    let draft = NewEmployee::new(" Carla ", 4100.5, "Gerente").unwrap();

    let id = store.insert_employee(&draft).unwrap();

    let rows = store.find_all().unwrap();
    assert_eq!(rows, vec![draft.into_employee(id)]);
    assert_eq!(rows[0].name, "Carla");
}

#[test]
fn insert_binds_values_instead_of_splicing_sql() {
    let mut store = ready_store();
    let hostile = "Robert'); DROP TABLE funcionarios;--";

    store.insert(hostile, "1", "O'Brien").unwrap();

    let rows = store.find_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, hostile);
    assert_eq!(rows[0].role, "O'Brien");
}

#[test]
fn insert_without_schema_is_a_write_error() {
    let mut store = EmployeeStore::new(StoreConfig::in_memory());

    let err = store.insert("Ana", "2500", "Analista").unwrap_err();

    assert_eq!(err.kind(), StoreErrorKind::Write);
    assert!(store.is_connected());

    store.ensure_schema().unwrap();
    store.insert("Ana", "2500", "Analista").unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn validation_error_reports_offending_value() {
    let err = NewEmployee::parse("Ana", "12abc", "Analista").unwrap_err();
    assert_eq!(
        err,
        EmployeeValidationError::NotANumber {
            field: EmployeeField::Salary,
            value: "12abc".to_string(),
        }
    );
    assert_eq!(err.to_string(), "salary must be a number, got `12abc`");
}
