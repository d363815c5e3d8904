//! HTTP handlers for the student CRUD surface.

pub mod students;
pub use students::*;
