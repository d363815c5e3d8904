//! Persistence collaborator: the `StudentRepo` trait and an in-memory
//! implementation used by tests and local demos.

use crate::error::AppError;
use crate::model::{NewStudent, Student, StudentChanges};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

/// The handful of operations the service layer needs from storage.
/// `PgStudentRepo` in `store` is the production implementation.
#[async_trait]
pub trait StudentRepo: Send + Sync {
    /// Exact lookup by registration number, any status.
    async fn find_by_registration_no(&self, reg_no: &str) -> Result<Option<Student>, AppError>;

    /// First student holding `(class, roll_no)`, any status, optionally
    /// excluding one registration number (the record being updated).
    async fn find_roll_conflict(
        &self,
        class_name: &str,
        roll_no: i32,
        exclude_reg_no: Option<&str>,
    ) -> Result<Option<Student>, AppError>;

    /// Count of students matching the optional status filter.
    async fn count(&self, status: Option<bool>) -> Result<i64, AppError>;

    /// Page of students matching the optional status filter, ordered by
    /// name ascending.
    async fn list(
        &self,
        status: Option<bool>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Student>, AppError>;

    /// Insert a new active student and return the stored record.
    async fn insert(&self, new: &NewStudent) -> Result<Student, AppError>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, reg_no: &str, changes: &StudentChanges) -> Result<Student, AppError>;

    /// Permanently remove the record.
    async fn delete(&self, reg_no: &str) -> Result<(), AppError>;
}

/// In-memory `StudentRepo` backed by a `Vec`. Not used in production;
/// exists so the service and router can be exercised without PostgreSQL.
#[derive(Default)]
pub struct MemoryStudentRepo {
    rows: Mutex<Vec<Student>>,
}

impl MemoryStudentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepo for MemoryStudentRepo {
    async fn find_by_registration_no(&self, reg_no: &str) -> Result<Option<Student>, AppError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|s| s.registration_no == reg_no).cloned())
    }

    async fn find_roll_conflict(
        &self,
        class_name: &str,
        roll_no: i32,
        exclude_reg_no: Option<&str>,
    ) -> Result<Option<Student>, AppError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|s| {
                s.class_name == class_name
                    && s.roll_no == roll_no
                    && exclude_reg_no != Some(s.registration_no.as_str())
            })
            .cloned())
    }

    async fn count(&self, status: Option<bool>) -> Result<i64, AppError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|s| status.map_or(true, |st| s.status == st))
            .count() as i64)
    }

    async fn list(
        &self,
        status: Option<bool>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Student>, AppError> {
        let rows = self.rows.lock().await;
        let mut matched: Vec<Student> = rows
            .iter()
            .filter(|s| status.map_or(true, |st| s.status == st))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(take.max(0) as usize)
            .collect())
    }

    async fn insert(&self, new: &NewStudent) -> Result<Student, AppError> {
        let mut rows = self.rows.lock().await;
        let now = Utc::now();
        let student = Student {
            registration_no: new.registration_no.clone(),
            name: new.name.clone(),
            class_name: new.class_name.clone(),
            roll_no: new.roll_no,
            contact_number: new.contact_number.clone(),
            status: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(student.clone());
        Ok(student)
    }

    async fn update(&self, reg_no: &str, changes: &StudentChanges) -> Result<Student, AppError> {
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|s| s.registration_no == reg_no)
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(class_name) = &changes.class_name {
            row.class_name = class_name.clone();
        }
        if let Some(roll_no) = changes.roll_no {
            row.roll_no = roll_no;
        }
        if let Some(contact_number) = &changes.contact_number {
            row.contact_number = contact_number.clone();
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, reg_no: &str) -> Result<(), AppError> {
        let mut rows = self.rows.lock().await;
        rows.retain(|s| s.registration_no != reg_no);
        Ok(())
    }
}
