/// Weekly timetable core: slot parsing, range compression, conflict checks.

mod conflict;
mod display;
mod slots;

pub use conflict::{check_batch, has_conflict, BatchCandidate, Occurrence};
pub use display::{format_times, weekday_label};
pub use slots::{compress, parse_slots, SectionRange, WeekSlot};
