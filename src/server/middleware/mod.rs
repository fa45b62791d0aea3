pub mod admin_validator;
pub mod user_validator;
