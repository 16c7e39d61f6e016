#![allow(dead_code)]

use products_hr::{Employee, EmployeeStore};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

pub const SCHEMA_SQL: &str = include_str!("../../../../sql/employees.sql");

/// Fresh in-memory database with the `employees` table in place.
pub async fn sqlite_store() -> EmployeeStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    bootstrap(&db).await;
    EmployeeStore::new(db)
}

/// In-memory database without the table, so every statement fails.
pub async fn broken_store() -> EmployeeStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    EmployeeStore::new(db)
}

pub async fn bootstrap(db: &DatabaseConnection) {
    db.execute_unprepared(SCHEMA_SQL).await.unwrap();
}

pub fn ann() -> Employee {
    Employee::new(1, "Ann Lee", "a@x.com", 50_000.0, "Eng")
}

pub fn staff() -> Vec<Employee> {
    vec![
        ann(),
        Employee::new(2, "Bob Stone", "bob@x.com", 42_500.5, "Ops"),
        Employee::new(3, "Carla Leeds", "carla@x.com", 61_000.0, "Eng"),
        Employee::new(4, "Dev 50%_Off", "dev@x.com", 10.0, "Sales"),
    ]
}

pub async fn seed(store: &EmployeeStore) -> Vec<Employee> {
    let staff = staff();
    for employee in &staff {
        store.insert(employee).await.unwrap();
    }
    staff
}
