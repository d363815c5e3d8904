//! Business rules: student operations and request validation.

pub mod students;
pub mod validation;

pub use students::StudentService;
pub use validation::{
    is_valid_contact_number, is_valid_registration_no, validate_reg_no_param,
    validate_student_data, ValidationMode,
};
