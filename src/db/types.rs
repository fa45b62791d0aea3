/// Database types for course-selection data

use serde::Serialize;

use crate::timetable::Occurrence;

#[derive(Debug, Clone, Serialize)]
pub struct DbUser {
    pub user_id: String,
    pub name: String,
    pub role: String,
}

impl DbUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DbCourse {
    pub course_id: String,
    pub name_zh: String,
    pub name_en: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<i32>,
    pub department_id: Option<String>,
    pub teacher_name: Option<String>,
    pub credit: i32,
    pub required_type: Option<String>,
    pub category: Option<String>,
    pub limit_max: Option<i32>,
}

/// One stored weekly meeting range of a course.
#[derive(Debug, Clone, Serialize)]
pub struct DbCourseTime {
    pub course_id: String,
    pub weekday: i32,
    pub start_section: i32,
    pub end_section: i32,
    pub classroom: Option<String>,
}

impl Occurrence for DbCourseTime {
    fn weekday(&self) -> i32 {
        self.weekday
    }
    fn start_section(&self) -> i32 {
        self.start_section
    }
    fn end_section(&self) -> i32 {
        self.end_section
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DbProgram {
    pub code: String,
    pub name: String,
}

/// Earned-credit totals aggregated from passed completed coursework.
#[derive(Debug, Clone, Default)]
pub struct EarnedCredits {
    pub total: i32,
    pub major_required: i32,
    pub general_required: i32,
    pub program: i32,
}
