//! School management REST API: student records CRUD over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use model::{ListQuery, NewStudent, Student, StudentChanges, StudentInput};
pub use repo::{MemoryStudentRepo, StudentRepo};
pub use routes::{common_routes, ready_routes, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{ensure_students_table, PgStudentRepo};
