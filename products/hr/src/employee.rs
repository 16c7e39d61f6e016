use entity::employees;
use sea_orm::ActiveValue::{NotSet, Set};

/// An employee record as seen by callers of the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub salary: f64,
    pub department: String,
}

impl Employee {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        salary: f64,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            salary,
            department: department.into(),
        }
    }

    /// Every column set, for inserts.
    pub(crate) fn to_active_model(&self) -> employees::ActiveModel {
        employees::ActiveModel {
            id: Set(self.id),
            ..self.to_changes()
        }
    }

    /// Every column except the key, for updates.
    pub(crate) fn to_changes(&self) -> employees::ActiveModel {
        employees::ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            email: Set(self.email.clone()),
            salary: Set(self.salary),
            department: Set(self.department.clone()),
        }
    }
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            salary: model.salary,
            department: model.department,
        }
    }
}
