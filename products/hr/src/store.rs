use entity::employees;
use platform_db::{DatabaseSettings, DbPool, DbResult};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use crate::{
    Employee,
    error::{HrError, HrResult, insert_error, store_error},
};

const LIKE_ESCAPE: char = '\\';

/// Relational store for employee records.
///
/// Holds nothing but the pool: every operation checks out a connection, runs
/// one parameterized statement and hands the connection back, whatever the
/// outcome. Concurrent writers to the same id are last-writer-wins.
#[derive(Clone, Debug)]
pub struct EmployeeStore {
    pool: DbPool,
}

impl EmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn connect(settings: &DatabaseSettings) -> DbResult<Self> {
        Ok(Self::new(platform_db::connect(settings).await?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[instrument(name = "hr.employees.list", skip_all)]
    pub async fn list_all(&self) -> HrResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await
            .map_err(|err| store_error("list_all", err))?;
        debug!(count = rows.len(), "listed employees");
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Employees whose name contains `pattern`. Case sensitivity is whatever
    /// the backend's collation gives `LIKE`; an empty pattern matches all.
    #[instrument(name = "hr.employees.search", skip_all, fields(pattern = %pattern))]
    pub async fn search(&self, pattern: &str) -> HrResult<Vec<Employee>> {
        let like = LikeExpr::new(format!("%{}%", escape_like(pattern))).escape(LIKE_ESCAPE);
        let rows = employees::Entity::find()
            .filter(Expr::col(employees::Column::Name).like(like))
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await
            .map_err(|err| store_error("search", err))?;
        debug!(count = rows.len(), "searched employees");
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    #[instrument(name = "hr.employees.get", skip(self))]
    pub async fn get_by_id(&self, id: i64) -> HrResult<Employee> {
        employees::Entity::find_by_id(id)
            .one(&self.pool)
            .await
            .map_err(|err| store_error("get_by_id", err))?
            .map(Employee::from)
            .ok_or(HrError::NotFound(id))
    }

    /// Persist a new record under its caller-assigned id. An existing id is
    /// reported as [`HrError::DuplicateKey`] and left untouched.
    #[instrument(name = "hr.employees.insert", skip_all, fields(id = employee.id))]
    pub async fn insert(&self, employee: &Employee) -> HrResult<()> {
        employees::Entity::insert(employee.to_active_model())
            .exec_without_returning(&self.pool)
            .await
            .map_err(|err| insert_error(employee.id, err))?;
        debug!("employee inserted");
        Ok(())
    }

    /// Overwrite every non-key column of the row keyed by `id`; `employee.id`
    /// is ignored. Fails with [`HrError::NotFound`] when no row matched.
    #[instrument(name = "hr.employees.update", skip(self, employee))]
    pub async fn update(&self, id: i64, employee: &Employee) -> HrResult<()> {
        let result = employees::Entity::update_many()
            .set(employee.to_changes())
            .filter(employees::Column::Id.eq(id))
            .exec(&self.pool)
            .await
            .map_err(|err| store_error("update", err))?;
        if result.rows_affected == 0 {
            return Err(HrError::NotFound(id));
        }
        debug!(rows = result.rows_affected, "employee updated");
        Ok(())
    }

    /// Remove the row keyed by `id`. Returns whether a row was removed;
    /// a missing id is not an error.
    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, id: i64) -> HrResult<bool> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await
            .map_err(|err| store_error("delete", err))?;
        debug!(rows = result.rows_affected, "employee delete executed");
        Ok(result.rows_affected > 0)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("Ann Lee"), "Ann Lee");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like(""), "");
    }
}
