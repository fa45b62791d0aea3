//! Timetable conflict detection.
//!
//! A conflict is two occurrences on the same weekday whose section
//! intervals share at least one section. Sections are discrete class
//! periods, so touching endpoints (e.g. `[1,2]` vs `[2,3]`) are a genuine
//! double-booking, not an off-by-one.

use super::slots::SectionRange;

/// Anything with a weekday and an inclusive section interval.
///
/// The detector only needs these three integers, so it works equally over
/// in-memory [`SectionRange`] values and persisted `course_times` rows.
pub trait Occurrence {
    fn weekday(&self) -> i32;
    fn start_section(&self) -> i32;
    fn end_section(&self) -> i32;
}

impl Occurrence for SectionRange {
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

impl<T: Occurrence> Occurrence for &T {
    fn weekday(&self) -> i32 {
        (*self).weekday()
    }
    fn start_section(&self) -> i32 {
        (*self).start_section()
    }
    fn end_section(&self) -> i32 {
        (*self).end_section()
    }
}

fn overlaps(a: &impl Occurrence, b: &impl Occurrence) -> bool {
    a.weekday() == b.weekday()
        && !(a.end_section() < b.start_section() || b.end_section() < a.start_section())
}

/// Returns true iff any held occurrence clashes with any candidate one.
///
/// Either side may be empty (no conflict). Both collections are a single
/// student's per-semester schedule, small enough that the pairwise scan
/// is the right tool.
pub fn has_conflict<H, C>(held: &[H], candidate: &[C]) -> bool
where
    H: Occurrence,
    C: Occurrence,
{
    held.iter().any(|h| candidate.iter().any(|c| overlaps(h, c)))
}

/// One course's occurrences in a batch add, tagged with the course id.
#[derive(Debug, Clone)]
pub struct BatchCandidate<O> {
    pub course_id: String,
    pub occurrences: Vec<O>,
}

/// Checks a batch of courses against a held schedule, in submission order.
///
/// Each course is checked against held ∪ all previously accepted courses
/// of the same batch, so a clash between two submitted courses is caught
/// and attributed to the one that introduced it.
///
/// # Returns
/// `Ok(accepted)` with the flattened accepted occurrences, or
/// `Err(course_id)` naming the first course that conflicts.
pub fn check_batch<H, O>(held: &[H], batch: &[BatchCandidate<O>]) -> Result<Vec<O>, String>
where
    H: Occurrence,
    O: Occurrence + Clone,
{
    let mut accepted: Vec<O> = Vec::new();
    for cand in batch {
        if has_conflict(held, &cand.occurrences) || has_conflict(&accepted, &cand.occurrences) {
            return Err(cand.course_id.clone());
        }
        accepted.extend(cand.occurrences.iter().cloned());
    }
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(weekday: i32, start: i32, end: i32) -> SectionRange {
        SectionRange::new(weekday, start, end)
    }

    #[test]
    fn test_no_conflict_when_either_side_empty() {
        let some = vec![occ(1, 1, 5)];
        assert!(!has_conflict::<SectionRange, _>(&[], &some));
        assert!(!has_conflict::<_, SectionRange>(&some, &[]));
        assert!(!has_conflict::<SectionRange, SectionRange>(&[], &[]));
    }

    #[test]
    fn test_different_weekday_never_conflicts() {
        assert!(!has_conflict(&[occ(1, 1, 5)], &[occ(2, 1, 5)]));
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        // Shared section 2 is a real double-booking.
        assert!(has_conflict(&[occ(1, 2, 2)], &[occ(1, 2, 4)]));
        assert!(has_conflict(&[occ(1, 1, 2)], &[occ(1, 2, 3)]));
    }

    #[test]
    fn test_disjoint_intervals_same_weekday() {
        assert!(!has_conflict(&[occ(1, 1, 2)], &[occ(1, 3, 4)]));
    }

    #[test]
    fn test_containment_conflicts() {
        assert!(has_conflict(&[occ(3, 2, 8)], &[occ(3, 4, 5)]));
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let cases = [
            (vec![occ(1, 1, 2)], vec![occ(1, 2, 3)]),
            (vec![occ(1, 1, 2)], vec![occ(1, 4, 5)]),
            (vec![occ(2, 3, 3)], vec![occ(5, 3, 3)]),
            (vec![occ(4, 1, 9), occ(5, 1, 1)], vec![occ(5, 1, 4)]),
        ];
        for (a, b) in &cases {
            assert_eq!(has_conflict(a, b), has_conflict(b, a));
        }
    }

    #[test]
    fn test_any_pair_suffices() {
        let held = vec![occ(1, 1, 2), occ(2, 5, 6)];
        let cand = vec![occ(3, 1, 1), occ(2, 6, 8)];
        assert!(has_conflict(&held, &cand));
    }

    #[test]
    fn test_batch_attributes_conflict_to_introducing_course() {
        let batch = vec![
            BatchCandidate {
                course_id: "A".into(),
                occurrences: vec![occ(1, 1, 2)],
            },
            BatchCandidate {
                course_id: "B".into(),
                occurrences: vec![occ(1, 2, 3)],
            },
        ];
        // A is fine against an empty schedule; B clashes with A at section 2.
        let err = check_batch::<SectionRange, _>(&[], &batch).unwrap_err();
        assert_eq!(err, "B");
    }

    #[test]
    fn test_batch_conflict_with_held_schedule() {
        let held = vec![occ(2, 3, 4)];
        let batch = vec![BatchCandidate {
            course_id: "C".into(),
            occurrences: vec![occ(2, 4, 6)],
        }];
        assert_eq!(check_batch(&held, &batch).unwrap_err(), "C");
    }

    #[test]
    fn test_batch_accepts_disjoint_courses() {
        let batch = vec![
            BatchCandidate {
                course_id: "A".into(),
                occurrences: vec![occ(1, 1, 2)],
            },
            BatchCandidate {
                course_id: "B".into(),
                occurrences: vec![occ(1, 3, 4), occ(2, 1, 1)],
            },
        ];
        let accepted = check_batch::<SectionRange, _>(&[], &batch).unwrap();
        assert_eq!(accepted.len(), 3);
    }
}
