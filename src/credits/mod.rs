//! Degree-credit progress computation.
//!
//! Turns aggregated earned-credit totals into the summary payload the
//! frontend renders: overall graduation progress, per-category rows, and
//! the student's elective program block.

mod config;

pub use config::CreditsConfig;

use serde::Serialize;

use crate::db::{DbProgram, EarnedCredits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Done,
    InProgress,
}

impl CreditStatus {
    fn from_counts(required: i32, earned: i32) -> Self {
        if earned >= required {
            CreditStatus::Done
        } else {
            CreditStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraduationSummary {
    pub required_total: i32,
    pub earned_total: i32,
    pub remaining_total: i32,
    pub progress_percent: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub key: &'static str,
    pub name: &'static str,
    pub required: i32,
    pub earned: i32,
    pub remaining: i32,
    pub status: CreditStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramSummary {
    pub selected: Option<DbProgram>,
    pub min_required: i32,
    pub earned: i32,
    pub remaining: i32,
    pub status: CreditStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditSummary {
    pub graduation: GraduationSummary,
    pub categories: Vec<CategorySummary>,
    pub program: ProgramSummary,
}

/// Computes credit-progress summaries against a [`CreditsConfig`].
pub struct CreditProcessor {
    config: CreditsConfig,
}

impl CreditProcessor {
    pub fn new(config: CreditsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreditsConfig {
        &self.config
    }

    /// Builds the full summary from earned totals and the selected program.
    ///
    /// Electives are whatever passed credit is neither major-required nor
    /// general-required. Remaining counts floor at zero and the progress
    /// percentage caps at 100, so an over-achieving transcript never shows
    /// negative remainders.
    pub fn compute_summary(
        &self,
        earned: &EarnedCredits,
        program: Option<DbProgram>,
    ) -> CreditSummary {
        let cfg = &self.config;
        let elective = earned.total - earned.major_required - earned.general_required;

        let progress_percent = if cfg.graduation_total > 0 {
            (((earned.total as f64 / cfg.graduation_total as f64) * 100.0).round() as i32).min(100)
        } else {
            0
        };

        let category = |key: &'static str, name: &'static str, required: i32, got: i32| CategorySummary {
            key,
            name,
            required,
            earned: got,
            remaining: (required - got).max(0),
            status: CreditStatus::from_counts(required, got),
        };

        CreditSummary {
            graduation: GraduationSummary {
                required_total: cfg.graduation_total,
                earned_total: earned.total,
                remaining_total: (cfg.graduation_total - earned.total).max(0),
                progress_percent,
            },
            categories: vec![
                category(
                    "major_required",
                    "Major Required",
                    cfg.major_required,
                    earned.major_required,
                ),
                category("elective", "Elective", cfg.elective_required, elective),
                category(
                    "general_required",
                    "General Required",
                    cfg.general_required,
                    earned.general_required,
                ),
            ],
            program: ProgramSummary {
                selected: program,
                min_required: cfg.program_min,
                earned: earned.program,
                remaining: (cfg.program_min - earned.program).max(0),
                status: CreditStatus::from_counts(cfg.program_min, earned.program),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earned(total: i32, major: i32, general: i32, program: i32) -> EarnedCredits {
        EarnedCredits {
            total,
            major_required: major,
            general_required: general,
            program,
        }
    }

    #[test]
    fn test_summary_for_fresh_student() {
        let p = CreditProcessor::new(CreditsConfig::default());
        let s = p.compute_summary(&earned(0, 0, 0, 0), None);
        assert_eq!(s.graduation.earned_total, 0);
        assert_eq!(s.graduation.remaining_total, 128);
        assert_eq!(s.graduation.progress_percent, 0);
        assert!(s
            .categories
            .iter()
            .all(|c| c.status == CreditStatus::InProgress));
        assert!(s.program.selected.is_none());
    }

    #[test]
    fn test_elective_is_residual() {
        let p = CreditProcessor::new(CreditsConfig::default());
        let s = p.compute_summary(&earned(40, 20, 10, 0), None);
        let elective = s.categories.iter().find(|c| c.key == "elective").unwrap();
        assert_eq!(elective.earned, 10);
    }

    #[test]
    fn test_over_achievement_floors_and_caps() {
        let p = CreditProcessor::new(CreditsConfig::default());
        let s = p.compute_summary(&earned(150, 70, 30, 25), None);
        assert_eq!(s.graduation.remaining_total, 0);
        assert_eq!(s.graduation.progress_percent, 100);
        let major = s
            .categories
            .iter()
            .find(|c| c.key == "major_required")
            .unwrap();
        assert_eq!(major.remaining, 0);
        assert_eq!(major.status, CreditStatus::Done);
        assert_eq!(s.program.status, CreditStatus::Done);
    }

    #[test]
    fn test_progress_percent_rounds() {
        let p = CreditProcessor::new(CreditsConfig::default());
        let s = p.compute_summary(&earned(64, 0, 0, 0), None);
        assert_eq!(s.graduation.progress_percent, 50);
    }
}
