//! Human-readable rendering of a course's weekly times.

use super::conflict::Occurrence;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Label for a 1-based weekday, falling back to the raw number.
pub fn weekday_label(weekday: i32) -> String {
    WEEKDAY_LABELS
        .get((weekday - 1) as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| weekday.to_string())
}

/// Formats occurrences (with optional classrooms) into a display string,
/// e.g. `"Mon 2-4 A101; Wed 5 B201"`. Single-section ranges render as one
/// number. Duplicate fragments are dropped, first occurrence wins.
pub fn format_times<O: Occurrence>(times: &[(O, Option<String>)]) -> Option<String> {
    if times.is_empty() {
        return None;
    }

    let mut seen = Vec::new();
    for (t, classroom) in times {
        let sec = if t.start_section() == t.end_section() {
            t.start_section().to_string()
        } else {
            format!("{}-{}", t.start_section(), t.end_section())
        };
        let room = classroom
            .as_deref()
            .map(|r| format!(" {r}"))
            .unwrap_or_default();
        let part = format!("{} {}{}", weekday_label(t.weekday()), sec, room);
        if !seen.contains(&part) {
            seen.push(part);
        }
    }
    Some(seen.join("; "))
}
