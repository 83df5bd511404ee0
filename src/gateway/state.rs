use std::sync::Arc;

use crate::evaluation::Evaluator;
use crate::shortlist::ShortlistStore;

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Evaluator,

    /// `None` when the shortlist endpoints are disabled.
    pub shortlist: Option<Arc<dyn ShortlistStore>>,
}

impl AppState {
    pub fn new(evaluator: Evaluator, shortlist: Option<Arc<dyn ShortlistStore>>) -> Self {
        Self {
            evaluator,
            shortlist,
        }
    }

    /// State without a shortlist store.
    pub fn evaluation_only(evaluator: Evaluator) -> Self {
        Self::new(evaluator, None)
    }

    pub(crate) fn shortlist_store(&self) -> Option<&Arc<dyn ShortlistStore>> {
        self.shortlist.as_ref()
    }
}
