//! Weekly time-slot model, token parsing, and range compression.
//!
//! A course's weekly meeting times arrive from the UI as grid tokens of the
//! form `"{weekday}-{section}"` (e.g. `"1-3"` = Monday, third period). The
//! parser turns those into a sorted, deduplicated slot set; the compressor
//! merges contiguous sections into the per-weekday ranges that get stored
//! as `course_times` rows.

/// Inclusive bounds of the weekly grid.
pub const WEEKDAY_MIN: i32 = 1;
pub const WEEKDAY_MAX: i32 = 7;
pub const SECTION_MIN: i32 = 1;
pub const SECTION_MAX: i32 = 20;

/// One occupied (weekday, section) cell of the weekly grid.
///
/// Ordering is by weekday, then section — the order the compressor and all
/// stored output rely on. Values outside the grid bounds are filtered out
/// at the parser boundary; nothing downstream re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekSlot {
    pub weekday: i32,
    pub section: i32,
}

impl WeekSlot {
    pub fn new(weekday: i32, section: i32) -> Self {
        Self { weekday, section }
    }

    fn in_bounds(&self) -> bool {
        (WEEKDAY_MIN..=WEEKDAY_MAX).contains(&self.weekday)
            && (SECTION_MIN..=SECTION_MAX).contains(&self.section)
    }

    /// Renders the slot back into its grid-token form, e.g. `"1-3"`.
    pub fn to_token(&self) -> String {
        format!("{}-{}", self.weekday, self.section)
    }
}

/// A maximal contiguous run of occupied sections on one weekday.
///
/// `start_section..=end_section` inclusive. Produced by [`compress`] and
/// persisted one row per range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionRange {
    pub weekday: i32,
    pub start_section: i32,
    pub end_section: i32,
}

impl SectionRange {
    pub fn new(weekday: i32, start_section: i32, end_section: i32) -> Self {
        Self {
            weekday,
            start_section,
            end_section,
        }
    }

    /// Expands the range back into its individual slots.
    pub fn slots(&self) -> impl Iterator<Item = WeekSlot> + '_ {
        (self.start_section..=self.end_section).map(|s| WeekSlot::new(self.weekday, s))
    }
}

/// Parses raw grid tokens into a sorted, deduplicated slot list.
///
/// Parsing is deliberately lenient: tokens that are empty after trimming,
/// lack the `-` separator, fail integer parsing, or fall outside the grid
/// bounds contribute nothing. The input comes from UI checkbox selections,
/// where client and server validation may drift, so best-effort beats a
/// hard failure on one bad cell.
///
/// # Returns
/// Valid slots ascending by (weekday, section), each at most once.
pub fn parse_slots<I, S>(tokens: I) -> Vec<WeekSlot>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<WeekSlot> = tokens
        .into_iter()
        .filter_map(|tok| {
            let tok = tok.as_ref().trim();
            let (day, sec) = tok.split_once('-')?;
            let slot = WeekSlot::new(day.trim().parse().ok()?, sec.trim().parse().ok()?);
            slot.in_bounds().then_some(slot)
        })
        .collect();

    out.sort_unstable();
    out.dedup();
    out
}

/// Merges a slot set into minimal contiguous per-weekday ranges.
///
/// Walks the slots in (weekday, section) order, extending the open range
/// while the next slot is on the same weekday and exactly one section
/// after the current end. A gap (or a weekday change) closes the range;
/// gaps are never bridged — sections 1 and 3 with 2 absent stay two
/// separate ranges.
///
/// Accepts unsorted/duplicated input and normalizes it first, so callers
/// holding output of [`parse_slots`] pay only an already-sorted pass.
pub fn compress(slots: &[WeekSlot]) -> Vec<SectionRange> {
    let mut slots = slots.to_vec();
    slots.sort_unstable();
    slots.dedup();

    let mut ranges = Vec::new();
    let mut open: Option<SectionRange> = None;

    for slot in slots {
        match open.as_mut() {
            Some(r) if r.weekday == slot.weekday && slot.section == r.end_section + 1 => {
                r.end_section = slot.section;
            }
            Some(r) => {
                ranges.push(*r);
                open = Some(SectionRange::new(slot.weekday, slot.section, slot.section));
            }
            None => {
                open = Some(SectionRange::new(slot.weekday, slot.section, slot.section));
            }
        }
    }
    if let Some(r) = open {
        ranges.push(r);
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(i32, i32)]) -> Vec<WeekSlot> {
        pairs.iter().map(|&(w, s)| WeekSlot::new(w, s)).collect()
    }

    #[test]
    fn test_parse_basic_tokens() {
        let parsed = parse_slots(["1-1", "1-2", "3-5"]);
        assert_eq!(parsed, slots(&[(1, 1), (1, 2), (3, 5)]));
    }

    #[test]
    fn test_parse_trims_and_dedups() {
        let parsed = parse_slots([" 2-3 ", "2-3", "2 - 3"]);
        assert_eq!(parsed, slots(&[(2, 3)]));
    }

    #[test]
    fn test_parse_skips_malformed_tokens() {
        let parsed = parse_slots(["", "   ", "12", "a-b", "1-", "-4", "1-2-3", "2-9"]);
        // "1-2-3" splits as ("1", "2-3"); the second half fails to parse.
        assert_eq!(parsed, slots(&[(2, 9)]));
    }

    #[test]
    fn test_parse_drops_out_of_range() {
        let parsed = parse_slots(["0-1", "8-1", "1-0", "1-21", "7-20"]);
        assert_eq!(parsed, slots(&[(7, 20)]));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_slots(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_parse_order_independent() {
        let a = parse_slots(["3-5", "1-2", "1-1"]);
        let b = parse_slots(["1-1", "1-2", "3-5"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_idempotent_over_tokens() {
        let first = parse_slots(["2-4", "1-1", "junk", "2-4"]);
        let tokens: Vec<String> = first.iter().map(|s| s.to_token()).collect();
        assert_eq!(parse_slots(&tokens), first);
    }

    #[test]
    fn test_compress_empty() {
        assert!(compress(&[]).is_empty());
    }

    #[test]
    fn test_compress_single_slot() {
        let ranges = compress(&slots(&[(4, 7)]));
        assert_eq!(ranges, vec![SectionRange::new(4, 7, 7)]);
    }

    #[test]
    fn test_compress_contiguous_merge() {
        let ranges = compress(&slots(&[(2, 4), (2, 5), (2, 6)]));
        assert_eq!(ranges, vec![SectionRange::new(2, 4, 6)]);
    }

    #[test]
    fn test_compress_preserves_gaps() {
        let ranges = compress(&slots(&[(1, 1), (1, 3)]));
        assert_eq!(
            ranges,
            vec![SectionRange::new(1, 1, 1), SectionRange::new(1, 3, 3)]
        );
    }

    #[test]
    fn test_compress_weekday_boundary() {
        // Same section numbers on consecutive weekdays never merge.
        let ranges = compress(&slots(&[(1, 20), (2, 1)]));
        assert_eq!(
            ranges,
            vec![SectionRange::new(1, 20, 20), SectionRange::new(2, 1, 1)]
        );
    }

    #[test]
    fn test_compress_unsorted_input() {
        let ranges = compress(&slots(&[(2, 5), (1, 2), (2, 4), (1, 1)]));
        assert_eq!(
            ranges,
            vec![SectionRange::new(1, 1, 2), SectionRange::new(2, 4, 5)]
        );
    }

    #[test]
    fn test_compress_round_trip() {
        let ranges = compress(&slots(&[(1, 1), (1, 2), (1, 4), (3, 5), (3, 6)]));
        let expanded: Vec<WeekSlot> = ranges.iter().flat_map(|r| r.slots()).collect();
        assert_eq!(compress(&expanded), ranges);
    }

    #[test]
    fn test_tokens_to_ranges_end_to_end() {
        let parsed = parse_slots(["1-1", "1-2", "1-4", "3-5"]);
        assert_eq!(parsed, slots(&[(1, 1), (1, 2), (1, 4), (3, 5)]));
        assert_eq!(
            compress(&parsed),
            vec![
                SectionRange::new(1, 1, 2),
                SectionRange::new(1, 4, 4),
                SectionRange::new(3, 5, 5),
            ]
        );
    }
}
