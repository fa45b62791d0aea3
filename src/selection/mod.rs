//! Selection operations: favorites, simulated selections, and per-semester
//! course selections, all conflict-checked before they commit.
//!
//! Conflict checking is read-check-write: load the held schedule, run the
//! detector, insert. Two concurrent adds for the same student could both
//! pass the check against a stale snapshot, so writes for a given
//! (student, semester) are serialized through [`SelectionLocks`].

mod error;

pub use error::SelectionError;

use dashmap::DashMap;
use std::sync::Arc;

use crate::db::{DbCourse, SelectionDbManager};
use crate::timetable::{check_batch, has_conflict, BatchCandidate};

/// Per-(student, semester) write locks for selection inserts.
///
/// Simulated selections are not semester-scoped; they use a fixed marker
/// in place of the semester.
pub struct SelectionLocks {
    locks: DashMap<(String, String), Arc<tokio::sync::Mutex<()>>>,
}

const SIMULATED_SCOPE: &str = "@simulated";

/// Statuses a selection row may carry. The conflict queries only consider
/// these, so anything else is rejected before it reaches the database.
const SELECTION_STATUSES: [&str; 2] = ["planned", "completed"];

impl SelectionLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Gets or creates the lock guarding a student's semester schedule.
    pub fn lock_for(&self, user_id: &str, semester: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .entry((user_id.to_string(), semester.to_string()))
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

impl Default for SelectionLocks {
    fn default() -> Self {
        Self::new()
    }
}

fn require_course(db: &SelectionDbManager, course_id: &str) -> Result<DbCourse, SelectionError> {
    db.get_course(course_id)?
        .ok_or_else(|| SelectionError::CourseNotFound {
            course_id: course_id.to_string(),
        })
}

/// Adds a course to the student's simulated schedule.
///
/// Rejects the add if the course's times clash with any already-simulated
/// course. A course without stored times never conflicts.
pub async fn add_simulated(
    db: &SelectionDbManager,
    locks: &SelectionLocks,
    user_id: &str,
    course_id: &str,
) -> Result<(), SelectionError> {
    require_course(db, course_id)?;

    let lock = locks.lock_for(user_id, SIMULATED_SCOPE);
    let _guard = lock.lock().await;

    let held = db.simulated_times(user_id)?;
    let new_times = db.times_for_course(course_id)?;
    if has_conflict(&held, &new_times) {
        return Err(SelectionError::TimeConflict {
            course_id: course_id.to_string(),
        });
    }
    if !db.add_simulated(user_id, course_id)? {
        return Err(SelectionError::AlreadySelected {
            course_id: course_id.to_string(),
        });
    }
    Ok(())
}

/// Outcome of a successful selection insert.
#[derive(Debug, Clone)]
pub struct SelectionReceipt {
    pub course_id: String,
    pub semester: String,
    pub status: String,
}

fn resolve_semester(
    course: &DbCourse,
    requested: Option<&str>,
) -> Result<String, SelectionError> {
    requested
        .map(str::to_string)
        .or_else(|| course.semester.clone())
        .ok_or(SelectionError::MissingSemester)
}

/// Adds one course to the student's planned selections for a semester.
///
/// The semester defaults to the course's own. Conflicts are checked
/// against every planned and completed selection the student already
/// holds for that semester.
pub async fn add_selection(
    db: &SelectionDbManager,
    locks: &SelectionLocks,
    user_id: &str,
    course_id: &str,
    semester: Option<&str>,
    status: &str,
) -> Result<SelectionReceipt, SelectionError> {
    if !SELECTION_STATUSES.contains(&status) {
        return Err(SelectionError::InvalidStatus {
            status: status.to_string(),
        });
    }
    let course = require_course(db, course_id)?;
    let semester = resolve_semester(&course, semester)?;

    let lock = locks.lock_for(user_id, &semester);
    let _guard = lock.lock().await;

    if db.selection_exists(user_id, course_id, &semester)? {
        return Err(SelectionError::AlreadySelected {
            course_id: course_id.to_string(),
        });
    }

    let new_times = db.times_for_course(course_id)?;
    if !new_times.is_empty() {
        let held = db.held_selection_times(user_id, &semester)?;
        if has_conflict(&held, &new_times) {
            return Err(SelectionError::TimeConflict {
                course_id: course_id.to_string(),
            });
        }
    }

    db.insert_selection(user_id, course_id, &semester, status)?;
    Ok(SelectionReceipt {
        course_id: course_id.to_string(),
        semester,
        status: status.to_string(),
    })
}

/// Adds several courses at once, in submission order.
///
/// Each course is checked against the held schedule plus the courses
/// accepted earlier in the same batch, so a clash between two submitted
/// courses is caught and attributed to the one that introduced it. The
/// whole batch commits or none of it does.
pub async fn add_selections_batch(
    db: &SelectionDbManager,
    locks: &SelectionLocks,
    user_id: &str,
    course_ids: &[String],
    semester: &str,
) -> Result<Vec<SelectionReceipt>, SelectionError> {
    let lock = locks.lock_for(user_id, semester);
    let _guard = lock.lock().await;

    let mut batch = Vec::new();
    for course_id in course_ids {
        require_course(db, course_id)?;
        if db.selection_exists(user_id, course_id, semester)? {
            return Err(SelectionError::AlreadySelected {
                course_id: course_id.clone(),
            });
        }
        batch.push(BatchCandidate {
            course_id: course_id.clone(),
            occurrences: db.times_for_course(course_id)?,
        });
    }

    let held = db.held_selection_times(user_id, semester)?;
    check_batch(&held, &batch)
        .map_err(|course_id| SelectionError::TimeConflict { course_id })?;

    let mut receipts = Vec::new();
    for course_id in course_ids {
        db.insert_selection(user_id, course_id, semester, "planned")?;
        receipts.push(SelectionReceipt {
            course_id: course_id.clone(),
            semester: semester.to_string(),
            status: "planned".to_string(),
        });
    }
    Ok(receipts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbCourse;
    use crate::timetable::{compress, parse_slots};

    fn setup() -> (SelectionDbManager, SelectionLocks) {
        let db = SelectionDbManager::open_in_memory();
        db.upsert_user("s1", "Student", "student").unwrap();
        (db, SelectionLocks::new())
    }

    fn seed(db: &SelectionDbManager, id: &str, tokens: &[&str]) {
        let course = DbCourse {
            course_id: id.to_string(),
            name_zh: id.to_string(),
            name_en: None,
            semester: Some("1141".to_string()),
            grade: None,
            department_id: None,
            teacher_name: None,
            credit: 3,
            required_type: None,
            category: None,
            limit_max: None,
        };
        let ranges = compress(&parse_slots(tokens));
        db.insert_course_with_times(&course, &ranges, None).unwrap();
    }

    #[tokio::test]
    async fn test_simulated_add_rejects_conflict() {
        let (db, locks) = setup();
        seed(&db, "CS101", &["1-1", "1-2"]);
        seed(&db, "CS102", &["1-2", "1-3"]);

        add_simulated(&db, &locks, "s1", "CS101").await.unwrap();
        let err = add_simulated(&db, &locks, "s1", "CS102").await.unwrap_err();
        assert!(matches!(
            err,
            SelectionError::TimeConflict { course_id } if course_id == "CS102"
        ));
    }

    #[tokio::test]
    async fn test_simulated_add_unknown_course() {
        let (db, locks) = setup();
        let err = add_simulated(&db, &locks, "s1", "NOPE").await.unwrap_err();
        assert!(matches!(err, SelectionError::CourseNotFound { .. }));
    }

    #[tokio::test]
    async fn test_selection_semester_defaults_to_course() {
        let (db, locks) = setup();
        seed(&db, "CS101", &["2-3"]);

        let receipt = add_selection(&db, &locks, "s1", "CS101", None, "planned")
            .await
            .unwrap();
        assert_eq!(receipt.semester, "1141");
        assert!(db.selection_exists("s1", "CS101", "1141").unwrap());
    }

    #[tokio::test]
    async fn test_selection_rejects_unknown_status() {
        let (db, locks) = setup();
        seed(&db, "CS101", &["2-3"]);

        let err = add_selection(&db, &locks, "s1", "CS101", None, "withdrawn")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InvalidStatus { status } if status == "withdrawn"
        ));
        assert!(!db.selection_exists("s1", "CS101", "1141").unwrap());
    }

    #[tokio::test]
    async fn test_selection_duplicate_rejected() {
        let (db, locks) = setup();
        seed(&db, "CS101", &["2-3"]);

        add_selection(&db, &locks, "s1", "CS101", None, "planned")
            .await
            .unwrap();
        let err = add_selection(&db, &locks, "s1", "CS101", None, "planned")
            .await
            .unwrap_err();
        assert!(matches!(err, SelectionError::AlreadySelected { .. }));
    }

    #[tokio::test]
    async fn test_selection_without_times_never_conflicts() {
        let (db, locks) = setup();
        seed(&db, "CS101", &["1-1"]);
        seed(&db, "SEM01", &[]);

        add_selection(&db, &locks, "s1", "CS101", None, "planned")
            .await
            .unwrap();
        add_selection(&db, &locks, "s1", "SEM01", None, "planned")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_batch_attributes_conflict_and_commits_nothing() {
        let (db, locks) = setup();
        seed(&db, "A", &["1-1", "1-2"]);
        seed(&db, "B", &["1-2", "1-3"]);

        let err = add_selections_batch(&db, &locks, "s1", &["A".into(), "B".into()], "1141")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::TimeConflict { course_id } if course_id == "B"
        ));
        // A must not have been committed.
        assert!(!db.selection_exists("s1", "A", "1141").unwrap());
    }

    #[tokio::test]
    async fn test_batch_disjoint_courses_all_commit() {
        let (db, locks) = setup();
        seed(&db, "A", &["1-1"]);
        seed(&db, "B", &["2-1"]);

        let receipts =
            add_selections_batch(&db, &locks, "s1", &["A".into(), "B".into()], "1141")
                .await
                .unwrap();
        assert_eq!(receipts.len(), 2);
        assert!(db.selection_exists("s1", "A", "1141").unwrap());
        assert!(db.selection_exists("s1", "B", "1141").unwrap());
    }
}
