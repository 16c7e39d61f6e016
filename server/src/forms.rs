use products_hr::Employee;
use serde::Deserialize;
use thiserror::Error;

/// Raw add/edit form submission. Everything arrives as text so a bad number
/// can be shown back to the user instead of rejected by the extractor.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub salary: String,
    pub department: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("id must be a whole number, got {0:?}")]
    InvalidId(String),
    #[error("salary must be a number, got {0:?}")]
    InvalidSalary(String),
    #[error("name is required")]
    MissingName,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub deleted: Option<i64>,
    /// Set when a delete matched no row.
    pub missing: Option<i64>,
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            salary: employee.salary.to_string(),
            department: employee.department.clone(),
        }
    }

    pub fn to_employee(&self) -> Result<Employee, FormError> {
        let raw = self.id.trim();
        let id = raw
            .parse::<i64>()
            .map_err(|_| FormError::InvalidId(raw.to_string()))?;
        self.to_employee_with_id(id)
    }

    /// Parse with the id taken from elsewhere (the edit URL).
    pub fn to_employee_with_id(&self, id: i64) -> Result<Employee, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        let raw = self.salary.trim();
        let salary = raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| FormError::InvalidSalary(raw.to_string()))?;

        Ok(Employee::new(
            id,
            self.name.clone(),
            self.email.clone(),
            salary,
            self.department.clone(),
        ))
    }
}
