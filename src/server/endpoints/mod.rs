pub mod admin;
pub mod courses;
pub mod credits;
pub mod favorites;
pub mod selections;
pub mod simulate;
pub mod status;
