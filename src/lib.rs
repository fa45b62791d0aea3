//! Course-selection backend: catalog search, favorites, simulated and
//! per-semester selections with timetable-conflict checking, credit
//! progress, and admin course management.

pub mod config;
pub mod credits;
pub mod db;
pub mod selection;
pub mod server;
pub mod timetable;
pub mod types;
