/// Database module for course, schedule, and selection data

mod types;

pub use types::{DbCourse, DbCourseTime, DbProgram, DbUser, EarnedCredits};

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result};
use std::sync::Mutex;

use crate::timetable::{SectionRange, WeekSlot};

const SCHEMA_SQL: &str = include_str!("../../sql/init_selection.sql");

/// Filters for the course-search queries. All fields are optional and
/// AND-ed together; `slots` matches a course whose stored times cover any
/// of the selected grid cells.
#[derive(Debug, Clone)]
pub struct CourseFilters {
    pub course_id: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<i32>,
    pub department_id: Option<String>,
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub required_type: Option<String>,
    pub credit: Option<i32>,
    pub slots: Vec<WeekSlot>,
    /// 1-based page number. Clamping to valid bounds happens at the API
    /// boundary; the query layer takes these values as given.
    pub page: u32,
    pub page_size: u32,
}

impl Default for CourseFilters {
    fn default() -> Self {
        Self {
            course_id: None,
            semester: None,
            grade: None,
            department_id: None,
            keyword: None,
            category: None,
            required_type: None,
            credit: None,
            slots: Vec::new(),
            page: 1,
            page_size: 20,
        }
    }
}

pub struct SelectionDbManager {
    db: Mutex<Connection>,
}

impl SelectionDbManager {
    /// Creates a new SelectionDbManager and initializes the database schema
    pub fn new(db_path: &str) -> Self {
        let conn = Connection::open(db_path).expect("Failed to open database");
        Self::with_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Self {
        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .expect("Failed to enable foreign keys");
        Self {
            db: Mutex::new(conn),
        }
    }

    // ----- users -----

    pub fn upsert_user(&self, user_id: &str, name: &str, role: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO users (user_id, name, role, created_at)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(user_id) DO UPDATE SET name = ?2, role = ?3",
            (user_id, name, role),
        )?;
        Ok(())
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<DbUser>> {
        let db = self.db.lock().unwrap();
        db.query_row(
            "SELECT user_id, name, role FROM users WHERE user_id = ?",
            [user_id],
            |row| {
                Ok(DbUser {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    role: row.get(2)?,
                })
            },
        )
        .optional()
    }

    // ----- courses -----

    /// Inserts (or replaces) a course together with its normalized weekly
    /// time ranges, atomically.
    pub fn insert_course_with_times(
        &self,
        course: &DbCourse,
        ranges: &[SectionRange],
        classroom: Option<&str>,
    ) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO courses (
                course_id, name_zh, name_en, semester, grade, department_id,
                teacher_name, credit, required_type, category, limit_max, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, datetime('now'))",
            params![
                course.course_id,
                course.name_zh,
                course.name_en,
                course.semester,
                course.grade,
                course.department_id,
                course.teacher_name,
                course.credit,
                course.required_type,
                course.category,
                course.limit_max,
            ],
        )?;
        tx.execute(
            "DELETE FROM course_times WHERE course_id = ?",
            [&course.course_id],
        )?;
        for r in ranges {
            tx.execute(
                "INSERT INTO course_times (course_id, weekday, start_section, end_section, classroom)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![course.course_id, r.weekday, r.start_section, r.end_section, classroom],
            )?;
        }
        tx.commit()
    }

    /// Replaces a course's stored time grid with the given ranges.
    ///
    /// Returns false if the course does not exist.
    pub fn replace_course_times(
        &self,
        course_id: &str,
        ranges: &[SectionRange],
        classroom: Option<&str>,
    ) -> Result<bool> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        let exists: i64 = tx.query_row(
            "SELECT COUNT(*) FROM courses WHERE course_id = ?",
            [course_id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Ok(false);
        }
        tx.execute("DELETE FROM course_times WHERE course_id = ?", [course_id])?;
        for r in ranges {
            tx.execute(
                "INSERT INTO course_times (course_id, weekday, start_section, end_section, classroom)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![course_id, r.weekday, r.start_section, r.end_section, classroom],
            )?;
        }
        tx.commit()?;
        Ok(true)
    }

    pub fn get_course(&self, course_id: &str) -> Result<Option<DbCourse>> {
        let db = self.db.lock().unwrap();
        db.query_row(
            &format!("SELECT {COURSE_COLS} FROM courses c WHERE c.course_id = ?"),
            [course_id],
            course_from_row,
        )
        .optional()
    }

    /// Gets a course's times, ordered by (weekday, start_section).
    pub fn times_for_course(&self, course_id: &str) -> Result<Vec<DbCourseTime>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT course_id, weekday, start_section, end_section, classroom
             FROM course_times WHERE course_id = ?
             ORDER BY weekday, start_section",
        )?;
        let times = stmt.query_map([course_id], time_from_row)?;
        times.collect()
    }

    /// Searches courses with the given filters; returns (total, page rows).
    pub fn search_courses(&self, filters: &CourseFilters) -> Result<(i64, Vec<DbCourse>)> {
        let mut where_sql = String::from("1 = 1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(v) = &filters.course_id {
            where_sql.push_str(" AND c.course_id LIKE ?");
            args.push(Box::new(format!("%{v}%")));
        }
        if let Some(v) = &filters.semester {
            where_sql.push_str(" AND c.semester = ?");
            args.push(Box::new(v.clone()));
        }
        if let Some(v) = filters.grade {
            where_sql.push_str(" AND c.grade = ?");
            args.push(Box::new(v));
        }
        if let Some(v) = &filters.department_id {
            where_sql.push_str(" AND c.department_id = ?");
            args.push(Box::new(v.clone()));
        }
        if let Some(v) = &filters.keyword {
            where_sql.push_str(" AND (c.name_zh LIKE ? OR c.name_en LIKE ?)");
            let like = format!("%{v}%");
            args.push(Box::new(like.clone()));
            args.push(Box::new(like));
        }
        if let Some(v) = &filters.category {
            where_sql.push_str(" AND c.category = ?");
            args.push(Box::new(v.clone()));
        }
        if let Some(v) = &filters.required_type {
            where_sql.push_str(" AND c.required_type = ?");
            args.push(Box::new(v.clone()));
        }
        if let Some(v) = filters.credit {
            where_sql.push_str(" AND c.credit = ?");
            args.push(Box::new(v));
        }

        // Grid filter: any selected cell covered by a stored range matches.
        if !filters.slots.is_empty() {
            let cell =
                "(t.weekday = ? AND t.start_section <= ? AND t.end_section >= ?)";
            let cells = vec![cell; filters.slots.len()].join(" OR ");
            where_sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM course_times t
                  WHERE t.course_id = c.course_id AND ({cells}))"
            ));
            for slot in &filters.slots {
                args.push(Box::new(slot.weekday));
                args.push(Box::new(slot.section));
                args.push(Box::new(slot.section));
            }
        }

        let db = self.db.lock().unwrap();

        let total: i64 = db.query_row(
            &format!("SELECT COUNT(*) FROM courses c WHERE {where_sql}"),
            params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| row.get(0),
        )?;

        let mut stmt = db.prepare(&format!(
            "SELECT {COURSE_COLS} FROM courses c WHERE {where_sql}
             ORDER BY c.course_id LIMIT ? OFFSET ?"
        ))?;
        let limit = filters.page_size as i64;
        args.push(Box::new(limit));
        args.push(Box::new(filters.page.saturating_sub(1) as i64 * limit));

        let rows = stmt.query_map(
            params_from_iter(args.iter().map(|a| a.as_ref())),
            course_from_row,
        )?;
        Ok((total, rows.collect::<Result<Vec<_>>>()?))
    }

    // ----- favorites -----

    /// Adds a favorite; returns false if it was already present.
    pub fn add_favorite(&self, user_id: &str, course_id: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n = db.execute(
            "INSERT OR IGNORE INTO favorites (user_id, course_id, created_at)
             VALUES (?1, ?2, datetime('now'))",
            (user_id, course_id),
        )?;
        Ok(n > 0)
    }

    pub fn remove_favorite(&self, user_id: &str, course_id: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n = db.execute(
            "DELETE FROM favorites WHERE user_id = ? AND course_id = ?",
            (user_id, course_id),
        )?;
        Ok(n > 0)
    }

    pub fn favorite_courses(&self, user_id: &str) -> Result<Vec<DbCourse>> {
        self.joined_courses(
            "JOIN favorites j ON j.course_id = c.course_id AND j.user_id = ?",
            user_id,
        )
    }

    // ----- simulated selection -----

    pub fn add_simulated(&self, user_id: &str, course_id: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n = db.execute(
            "INSERT OR IGNORE INTO simulated_selections (user_id, course_id, created_at)
             VALUES (?1, ?2, datetime('now'))",
            (user_id, course_id),
        )?;
        Ok(n > 0)
    }

    pub fn remove_simulated(&self, user_id: &str, course_id: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n = db.execute(
            "DELETE FROM simulated_selections WHERE user_id = ? AND course_id = ?",
            (user_id, course_id),
        )?;
        Ok(n > 0)
    }

    pub fn simulated_courses(&self, user_id: &str) -> Result<Vec<DbCourse>> {
        self.joined_courses(
            "JOIN simulated_selections j ON j.course_id = c.course_id AND j.user_id = ?",
            user_id,
        )
    }

    /// All times of the user's currently simulated courses.
    pub fn simulated_times(&self, user_id: &str) -> Result<Vec<DbCourseTime>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT t.course_id, t.weekday, t.start_section, t.end_section, t.classroom
             FROM course_times t
             JOIN simulated_selections s ON s.course_id = t.course_id
             WHERE s.user_id = ?
             ORDER BY t.weekday, t.start_section",
        )?;
        let times = stmt.query_map([user_id], time_from_row)?;
        times.collect()
    }

    // ----- per-semester selections -----

    pub fn selection_exists(&self, user_id: &str, course_id: &str, semester: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n: i64 = db.query_row(
            "SELECT COUNT(*) FROM student_course_selections
             WHERE user_id = ? AND course_id = ? AND semester = ?",
            (user_id, course_id, semester),
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    pub fn insert_selection(
        &self,
        user_id: &str,
        course_id: &str,
        semester: &str,
        status: &str,
    ) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO student_course_selections (user_id, course_id, semester, status, created_at)
             VALUES (?1, ?2, ?3, ?4, datetime('now'))",
            (user_id, course_id, semester, status),
        )?;
        Ok(())
    }

    /// Times of every planned or completed selection the user holds for
    /// the semester. This is the "held schedule" side of a conflict check.
    pub fn held_selection_times(&self, user_id: &str, semester: &str) -> Result<Vec<DbCourseTime>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT t.course_id, t.weekday, t.start_section, t.end_section, t.classroom
             FROM course_times t
             JOIN student_course_selections s ON s.course_id = t.course_id
             WHERE s.user_id = ? AND s.semester = ? AND s.status IN ('planned', 'completed')
             ORDER BY t.weekday, t.start_section",
        )?;
        let times = stmt.query_map((user_id, semester), time_from_row)?;
        times.collect()
    }

    /// Courses selected for the semester with the given status.
    pub fn selected_courses(
        &self,
        user_id: &str,
        semester: &str,
        status: &str,
    ) -> Result<Vec<DbCourse>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(&format!(
            "SELECT {COURSE_COLS} FROM courses c
             JOIN student_course_selections s ON s.course_id = c.course_id
             WHERE s.user_id = ? AND s.semester = ? AND s.status = ?
             ORDER BY c.course_id"
        ))?;
        let rows = stmt.query_map((user_id, semester, status), course_from_row)?;
        rows.collect()
    }

    // ----- programs and credits -----

    pub fn list_programs(&self) -> Result<Vec<DbProgram>> {
        let db = self.db.lock().unwrap();
        let mut stmt =
            db.prepare("SELECT code, name FROM programs ORDER BY program_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(DbProgram {
                code: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    pub fn insert_program(&self, code: &str, name: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT OR IGNORE INTO programs (code, name) VALUES (?1, ?2)",
            (code, name),
        )?;
        Ok(())
    }

    pub fn add_program_course(&self, program_code: &str, course_id: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT OR IGNORE INTO program_courses (program_id, course_id)
             SELECT program_id, ?2 FROM programs WHERE code = ?1",
            (program_code, course_id),
        )?;
        Ok(())
    }

    /// Sets the student's program; returns false if the code is unknown.
    pub fn set_student_program(&self, user_id: &str, program_code: &str) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let program_id: Option<i64> = db
            .query_row(
                "SELECT program_id FROM programs WHERE code = ?",
                [program_code],
                |row| row.get(0),
            )
            .optional()?;
        let Some(program_id) = program_id else {
            return Ok(false);
        };
        db.execute(
            "INSERT INTO student_programs (user_id, program_id) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET program_id = ?2",
            (user_id, program_id),
        )?;
        Ok(true)
    }

    pub fn student_program(&self, user_id: &str) -> Result<Option<DbProgram>> {
        let db = self.db.lock().unwrap();
        db.query_row(
            "SELECT p.code, p.name FROM programs p
             JOIN student_programs sp ON sp.program_id = p.program_id
             WHERE sp.user_id = ?",
            [user_id],
            |row| {
                Ok(DbProgram {
                    code: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
    }

    pub fn record_completed_course(
        &self,
        user_id: &str,
        course_id: &str,
        passed: bool,
    ) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT OR REPLACE INTO student_courses (user_id, course_id, status, passed)
             VALUES (?1, ?2, 'completed', ?3)",
            (user_id, course_id, passed),
        )?;
        Ok(())
    }

    /// Aggregates the user's earned credits over passed completed courses.
    ///
    /// `major_like` / `general_like` are SQL LIKE patterns matched against
    /// `required_type` to split out the category totals.
    pub fn earned_credits(
        &self,
        user_id: &str,
        major_like: &str,
        general_like: &str,
    ) -> Result<EarnedCredits> {
        let db = self.db.lock().unwrap();
        let (total, major_required, general_required) = db.query_row(
            "SELECT
                COALESCE(SUM(c.credit), 0),
                COALESCE(SUM(CASE WHEN c.required_type LIKE ?2 THEN c.credit ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN c.required_type LIKE ?3 THEN c.credit ELSE 0 END), 0)
             FROM courses c
             JOIN student_courses sc ON sc.course_id = c.course_id
             WHERE sc.user_id = ?1 AND sc.status = 'completed' AND sc.passed = 1",
            (user_id, major_like, general_like),
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let program: i32 = db.query_row(
            "SELECT COALESCE(SUM(c.credit), 0)
             FROM courses c
             JOIN student_courses sc ON sc.course_id = c.course_id
             JOIN program_courses pc ON pc.course_id = c.course_id
             JOIN student_programs sp ON sp.program_id = pc.program_id AND sp.user_id = sc.user_id
             WHERE sc.user_id = ? AND sc.status = 'completed' AND sc.passed = 1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(EarnedCredits {
            total,
            major_required,
            general_required,
            program,
        })
    }

    fn joined_courses(&self, join_sql: &str, user_id: &str) -> Result<Vec<DbCourse>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(&format!(
            "SELECT {COURSE_COLS} FROM courses c {join_sql} ORDER BY c.course_id"
        ))?;
        let rows = stmt.query_map([user_id], course_from_row)?;
        rows.collect()
    }
}

const COURSE_COLS: &str = "c.course_id, c.name_zh, c.name_en, c.semester, c.grade, \
     c.department_id, c.teacher_name, c.credit, c.required_type, c.category, c.limit_max";

fn course_from_row(row: &rusqlite::Row<'_>) -> Result<DbCourse> {
    Ok(DbCourse {
        course_id: row.get(0)?,
        name_zh: row.get(1)?,
        name_en: row.get(2)?,
        semester: row.get(3)?,
        grade: row.get(4)?,
        department_id: row.get(5)?,
        teacher_name: row.get(6)?,
        credit: row.get(7)?,
        required_type: row.get(8)?,
        category: row.get(9)?,
        limit_max: row.get(10)?,
    })
}

fn time_from_row(row: &rusqlite::Row<'_>) -> Result<DbCourseTime> {
    Ok(DbCourseTime {
        course_id: row.get(0)?,
        weekday: row.get(1)?,
        start_section: row.get(2)?,
        end_section: row.get(3)?,
        classroom: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{compress, parse_slots};

    fn course(id: &str, name: &str) -> DbCourse {
        DbCourse {
            course_id: id.to_string(),
            name_zh: name.to_string(),
            name_en: None,
            semester: Some("1141".to_string()),
            grade: Some(1),
            department_id: Some("CS".to_string()),
            teacher_name: None,
            credit: 3,
            required_type: None,
            category: None,
            limit_max: Some(60),
        }
    }

    fn seed(db: &SelectionDbManager, id: &str, tokens: &[&str]) {
        let ranges = compress(&parse_slots(tokens));
        db.insert_course_with_times(&course(id, id), &ranges, Some("A101"))
            .unwrap();
    }

    #[test]
    fn test_course_times_round_trip() {
        let db = SelectionDbManager::open_in_memory();
        seed(&db, "CS101", &["1-1", "1-2", "1-4", "3-5"]);

        let times = db.times_for_course("CS101").unwrap();
        let triples: Vec<_> = times
            .iter()
            .map(|t| (t.weekday, t.start_section, t.end_section))
            .collect();
        assert_eq!(triples, vec![(1, 1, 2), (1, 4, 4), (3, 5, 5)]);
    }

    #[test]
    fn test_replace_course_times() {
        let db = SelectionDbManager::open_in_memory();
        seed(&db, "CS101", &["1-1"]);

        let ranges = compress(&parse_slots(["2-3", "2-4"]));
        assert!(db.replace_course_times("CS101", &ranges, None).unwrap());
        let times = db.times_for_course("CS101").unwrap();
        assert_eq!(times.len(), 1);
        assert_eq!(
            (times[0].weekday, times[0].start_section, times[0].end_section),
            (2, 3, 4)
        );

        assert!(!db.replace_course_times("NOPE", &ranges, None).unwrap());
    }

    #[test]
    fn test_search_by_slot_grid() {
        let db = SelectionDbManager::open_in_memory();
        seed(&db, "CS101", &["1-1", "1-2"]);
        seed(&db, "CS102", &["3-5"]);

        let filters = CourseFilters {
            slots: parse_slots(["1-2"]),
            page: 1,
            page_size: 20,
            ..Default::default()
        };
        let (total, rows) = db.search_courses(&filters).unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].course_id, "CS101");
    }

    #[test]
    fn test_search_keyword_and_pagination() {
        let db = SelectionDbManager::open_in_memory();
        for i in 0..5 {
            seed(&db, &format!("CS10{i}"), &["1-1"]);
        }
        let filters = CourseFilters {
            keyword: Some("CS10".to_string()),
            page: 2,
            page_size: 2,
            ..Default::default()
        };
        let (total, rows) = db.search_courses(&filters).unwrap();
        assert_eq!(total, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course_id, "CS102");
    }

    #[test]
    fn test_favorites_add_remove() {
        let db = SelectionDbManager::open_in_memory();
        db.upsert_user("s1", "Student", "student").unwrap();
        seed(&db, "CS101", &["1-1"]);

        assert!(db.add_favorite("s1", "CS101").unwrap());
        assert!(!db.add_favorite("s1", "CS101").unwrap());
        assert_eq!(db.favorite_courses("s1").unwrap().len(), 1);
        assert!(db.remove_favorite("s1", "CS101").unwrap());
        assert!(!db.remove_favorite("s1", "CS101").unwrap());
    }

    #[test]
    fn test_simulated_times_join() {
        let db = SelectionDbManager::open_in_memory();
        db.upsert_user("s1", "Student", "student").unwrap();
        seed(&db, "CS101", &["1-1", "1-2"]);
        seed(&db, "CS102", &["2-3"]);
        db.add_simulated("s1", "CS101").unwrap();
        db.add_simulated("s1", "CS102").unwrap();

        let times = db.simulated_times("s1").unwrap();
        assert_eq!(times.len(), 2);
    }

    #[test]
    fn test_held_selection_times_by_semester() {
        let db = SelectionDbManager::open_in_memory();
        db.upsert_user("s1", "Student", "student").unwrap();
        seed(&db, "CS101", &["1-1"]);
        seed(&db, "CS102", &["2-2"]);
        db.insert_selection("s1", "CS101", "1141", "planned").unwrap();
        db.insert_selection("s1", "CS102", "1132", "planned").unwrap();

        let held = db.held_selection_times("s1", "1141").unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].course_id, "CS101");
        assert!(db.selection_exists("s1", "CS101", "1141").unwrap());
        assert!(!db.selection_exists("s1", "CS101", "1132").unwrap());
    }

    #[test]
    fn test_earned_credits_aggregation() {
        let db = SelectionDbManager::open_in_memory();
        db.upsert_user("s1", "Student", "student").unwrap();

        let mut major = course("CS101", "Algorithms");
        major.required_type = Some("Major Required".to_string());
        major.credit = 3;
        db.insert_course_with_times(&major, &[], None).unwrap();

        let mut gen = course("GE001", "Writing");
        gen.required_type = Some("General Required".to_string());
        gen.credit = 2;
        db.insert_course_with_times(&gen, &[], None).unwrap();

        let mut failed = course("CS999", "Dropped");
        failed.credit = 4;
        db.insert_course_with_times(&failed, &[], None).unwrap();

        db.record_completed_course("s1", "CS101", true).unwrap();
        db.record_completed_course("s1", "GE001", true).unwrap();
        db.record_completed_course("s1", "CS999", false).unwrap();

        db.insert_program("AI", "AI Program").unwrap();
        db.add_program_course("AI", "CS101").unwrap();
        assert!(db.set_student_program("s1", "AI").unwrap());
        assert!(!db.set_student_program("s1", "NOPE").unwrap());

        let earned = db
            .earned_credits("s1", "%Major Required%", "%General Required%")
            .unwrap();
        assert_eq!(earned.total, 5);
        assert_eq!(earned.major_required, 3);
        assert_eq!(earned.general_required, 2);
        assert_eq!(earned.program, 3);
    }
}
