//! Student operations: the business rules between the HTTP surface and
//! the persistence collaborator.

use crate::error::AppError;
use crate::model::{ListQuery, NewStudent, Student, StudentChanges, StudentInput};
use crate::repo::StudentRepo;
use crate::response::PageMeta;
use crate::service::validation::{coerce_roll_no, non_empty, truthy};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

pub struct StudentService;

impl StudentService {
    /// Create a new active student. Both uniqueness checks run before
    /// the insert; the database constraint backstops races.
    pub async fn create(
        repo: &dyn StudentRepo,
        input: StudentInput,
    ) -> Result<Student, AppError> {
        let new = require_create_fields(input)?;

        if repo
            .find_by_registration_no(&new.registration_no)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Student with this registration number already exists".to_string(),
            ));
        }

        if repo
            .find_roll_conflict(&new.class_name, new.roll_no, None)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Roll number {} is already assigned in class {}",
                new.roll_no, new.class_name
            )));
        }

        repo.insert(&new).await
    }

    /// Paginated list ordered by name ascending, optionally filtered by
    /// status (`"true"`/`"1"` select active, any other value inactive).
    pub async fn list(
        repo: &dyn StudentRepo,
        query: &ListQuery,
    ) -> Result<(Vec<Student>, PageMeta), AppError> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        let skip = if page < 1 || limit < 1 {
            None
        } else {
            // an absurd page * limit must not overflow the offset
            (page - 1).checked_mul(limit)
        };
        let skip = skip.ok_or_else(|| {
            AppError::BadRequest("Page and limit must be positive integers".to_string())
        })?;

        let status = query.status.as_deref().map(|s| s == "true" || s == "1");

        let total = repo.count(status).await?;
        let rows = repo.list(status, skip, limit).await?;

        let meta = PageMeta {
            total,
            page,
            limit,
            // total >= 0 and limit >= 1 here; i64::div_ceil is unstable
            total_pages: (total as u64).div_ceil(limit as u64) as i64,
        };
        Ok((rows, meta))
    }

    /// Exact lookup by registration number, any status.
    pub async fn get_by_registration_no(
        repo: &dyn StudentRepo,
        reg_no: &str,
    ) -> Result<Student, AppError> {
        repo.find_by_registration_no(reg_no)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Partial update. Empty strings and a roll number of zero count as
    /// "not supplied" (a documented quirk clients rely on); a supplied
    /// status always applies, including false.
    pub async fn update(
        repo: &dyn StudentRepo,
        reg_no: &str,
        input: StudentInput,
    ) -> Result<Student, AppError> {
        let existing = repo
            .find_by_registration_no(reg_no)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let supplied_class = non_empty(input.class_name.as_ref()).cloned();
        let supplied_roll = input
            .roll_no
            .as_ref()
            .filter(|v| truthy(v))
            .and_then(coerce_roll_no)
            .map(|n| n as i32);

        let class_to_check = supplied_class
            .clone()
            .unwrap_or_else(|| existing.class_name.clone());
        let roll_to_check = supplied_roll.unwrap_or(existing.roll_no);

        if repo
            .find_roll_conflict(&class_to_check, roll_to_check, Some(reg_no))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Roll number {} is already assigned in class {}",
                roll_to_check, class_to_check
            )));
        }

        let changes = StudentChanges {
            name: non_empty(input.name.as_ref()).cloned(),
            class_name: supplied_class,
            roll_no: supplied_roll,
            contact_number: non_empty(input.contact_number.as_ref()).cloned(),
            status: input.status.as_ref().map(truthy),
        };

        if changes.is_empty() {
            return Ok(existing);
        }
        repo.update(reg_no, &changes).await
    }

    /// Soft delete by default (flip status to false, idempotent);
    /// permanent delete erases the row.
    pub async fn delete(
        repo: &dyn StudentRepo,
        reg_no: &str,
        permanent: bool,
    ) -> Result<&'static str, AppError> {
        if repo.find_by_registration_no(reg_no).await?.is_none() {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        if permanent {
            repo.delete(reg_no).await?;
            return Ok("Student permanently deleted");
        }

        let changes = StudentChanges {
            status: Some(false),
            ..StudentChanges::default()
        };
        repo.update(reg_no, &changes).await?;
        Ok("Student deactivated successfully")
    }
}

fn require_create_fields(input: StudentInput) -> Result<NewStudent, AppError> {
    // The validator runs before the service; these guards keep the
    // service safe when called directly.
    let missing = |field: &str| AppError::BadRequest(format!("{} is required", field));
    let roll_no = input
        .roll_no
        .as_ref()
        .and_then(coerce_roll_no)
        .filter(|n| *n > 0)
        .ok_or_else(|| missing("Roll number"))? as i32;
    Ok(NewStudent {
        registration_no: input.registration_no.ok_or_else(|| missing("Registration number"))?,
        name: input.name.ok_or_else(|| missing("Name"))?,
        class_name: input.class_name.ok_or_else(|| missing("Class"))?,
        roll_no,
        contact_number: input.contact_number.ok_or_else(|| missing("Contact number"))?,
    })
}
