//! PostgreSQL implementation of the persistence collaborator, plus the
//! `students` table DDL applied at startup.

use crate::error::AppError;
use crate::model::{NewStudent, Student, StudentChanges};
use crate::repo::StudentRepo;
use async_trait::async_trait;
use sqlx::PgPool;

/// Create the students table if missing. The UNIQUE constraint on
/// (class, roll_no) backstops the service-level check-then-act: a race
/// between two writers surfaces as a database error instead of a
/// duplicate assignment.
pub async fn ensure_students_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS students (
            registration_no TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            class TEXT NOT NULL,
            roll_no INTEGER NOT NULL,
            contact_number TEXT NOT NULL,
            status BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (class, roll_no)
        )
    "#;
    sqlx::query(ddl).execute(pool).await?;
    Ok(())
}

const SELECT_COLUMNS: &str =
    "registration_no, name, class, roll_no, contact_number, status, created_at, updated_at";

/// `StudentRepo` over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStudentRepo {
    pool: PgPool,
}

impl PgStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepo for PgStudentRepo {
    async fn find_by_registration_no(&self, reg_no: &str) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM students WHERE registration_no = $1");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(reg_no)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_roll_conflict(
        &self,
        class_name: &str,
        roll_no: i32,
        exclude_reg_no: Option<&str>,
    ) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM students \
             WHERE class = $1 AND roll_no = $2 \
             AND ($3::text IS NULL OR registration_no <> $3) \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(class_name)
            .bind(roll_no)
            .bind(exclude_reg_no)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count(&self, status: Option<bool>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM students WHERE ($1::boolean IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list(
        &self,
        status: Option<bool>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM students \
             WHERE ($1::boolean IS NULL OR status = $1) \
             ORDER BY name ASC OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(status)
            .bind(skip)
            .bind(take)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, new: &NewStudent) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO students (registration_no, name, class, roll_no, contact_number, status) \
             VALUES ($1, $2, $3, $4, $5, TRUE) \
             RETURNING {SELECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&new.registration_no)
            .bind(&new.name)
            .bind(&new.class_name)
            .bind(new.roll_no)
            .bind(&new.contact_number)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, reg_no: &str, changes: &StudentChanges) -> Result<Student, AppError> {
        let sql = format!(
            "UPDATE students SET \
             name = COALESCE($2, name), \
             class = COALESCE($3, class), \
             roll_no = COALESCE($4, roll_no), \
             contact_number = COALESCE($5, contact_number), \
             status = COALESCE($6, status), \
             updated_at = NOW() \
             WHERE registration_no = $1 \
             RETURNING {SELECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(reg_no)
            .bind(&changes.name)
            .bind(&changes.class_name)
            .bind(changes.roll_no)
            .bind(&changes.contact_number)
            .bind(changes.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, reg_no: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM students WHERE registration_no = $1")
            .bind(reg_no)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
