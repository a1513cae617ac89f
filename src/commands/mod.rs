// ReelPick - Commands Module
// User-level flows over the selector, history store and launcher.
// Any front end (the CLI today) calls these and renders the typed results.

pub mod pick;
pub mod settings;

#[cfg(test)]
mod tests;

use rand::rngs::StdRng;
use rand::Rng;

use crate::history::HistoryStore;
use crate::launcher::Launcher;
use crate::selector::Selector;

pub struct App<L: Launcher, R: Rng = StdRng> {
    store: HistoryStore,
    selector: Selector<R>,
    launcher: L,
}

impl<L: Launcher> App<L, StdRng> {
    pub fn new(store: HistoryStore, launcher: L) -> Self {
        Self::with_selector(store, Selector::new(), launcher)
    }
}

impl<L: Launcher, R: Rng> App<L, R> {
    pub fn with_selector(store: HistoryStore, selector: Selector<R>, launcher: L) -> Self {
        Self { store, selector, launcher }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.store
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}
