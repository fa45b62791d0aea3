/// Shared application state

use crate::credits::CreditProcessor;
use crate::db::SelectionDbManager;
use crate::selection::SelectionLocks;

/// State shared by every request handler.
pub struct AppState {
    pub db: SelectionDbManager,
    pub credits: CreditProcessor,
    pub selection_locks: SelectionLocks,
}

impl AppState {
    pub fn new(db: SelectionDbManager, credits: CreditProcessor) -> Self {
        Self {
            db,
            credits,
            selection_locks: SelectionLocks::new(),
        }
    }
}
