use std::sync::Arc;

use crate::notify::Notifier;
use crate::quotes::QuoteProvider;
use crate::scheduler::Clock;
use crate::store::HabitStore;

#[derive(Clone)]
pub struct AppState {
    pub store: HabitStore,
    pub notifier: Notifier,
    pub quotes: QuoteProvider,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        store: HabitStore,
        notifier: Notifier,
        quotes: QuoteProvider,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            quotes,
            clock,
        }
    }
}
