//! HR vertical slice: employee records and their relational store.

mod employee;
mod error;
mod store;

pub use employee::Employee;
pub use error::{HrError, HrResult};
pub use store::EmployeeStore;
