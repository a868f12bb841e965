use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use places::PlaceSource;
use shared::{
    domain::{Filter, Place},
    error::SourceError,
    protocol::RenderPhase,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info};

mod state;

pub use state::ViewState;

/// Owner of the page's [`ViewState`]. Creating one mounts the view and starts
/// the one-shot places load; dropping it unmounts the view.
pub struct ViewController {
    state: Arc<RwLock<ViewState>>,
    loaded: watch::Receiver<bool>,
}

impl ViewController {
    /// Mounts the view and spawns the load on the current tokio runtime.
    /// The returned controller is already in [`RenderPhase::Loading`].
    ///
    /// Panics when called outside a tokio runtime.
    pub fn mount(source: Arc<dyn PlaceSource>) -> Self {
        let (controller, _load_task) = Self::mount_with_task(source);
        controller
    }

    pub(crate) fn mount_with_task(source: Arc<dyn PlaceSource>) -> (Self, JoinHandle<()>) {
        let mut state = ViewState::new();
        state.begin_load();
        let state = Arc::new(RwLock::new(state));
        let (loaded_tx, loaded_rx) = watch::channel(false);

        let load_task = tokio::spawn(load_places(source, Arc::downgrade(&state), loaded_tx));

        (
            Self {
                state,
                loaded: loaded_rx,
            },
            load_task,
        )
    }

    pub fn set_filter(&self, filter: impl Into<Filter>) {
        let filter = filter.into();
        debug!(filter = %filter, "active filter changed");
        self.write().set_filter(filter);
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    pub fn phase(&self) -> RenderPhase {
        self.read().phase()
    }

    pub fn active_filter(&self) -> Filter {
        self.read().active_filter().clone()
    }

    pub fn filtered_places(&self) -> Vec<Place> {
        self.read().filtered_places().into_iter().cloned().collect()
    }

    /// Copy of the current state, for rendering outside the lock.
    pub fn snapshot(&self) -> ViewState {
        self.read().clone()
    }

    /// Resolves once the load has settled, whether it succeeded or failed.
    pub async fn wait_loaded(&self) {
        let mut loaded = self.loaded.clone();
        // A dropped sender means the load task is gone; nothing left to wait for.
        let _ = loaded.wait_for(|done| *done).await;
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn load_places(
    source: Arc<dyn PlaceSource>,
    state: Weak<RwLock<ViewState>>,
    loaded: watch::Sender<bool>,
) {
    // A panicking source must still end the load, so the fetch runs in its
    // own task and a join failure counts as a source error.
    let fetch = tokio::spawn(async move { source.fetch_places().await });
    let result = match fetch.await {
        Ok(result) => result,
        Err(join_error) => Err(SourceError::new(format!(
            "place source task failed: {join_error}"
        ))),
    };
    match &result {
        Ok(places) => info!(count = places.len(), "nearby places loaded"),
        Err(error) => error!(%error, "error fetching nearby places"),
    }

    let Some(state) = state.upgrade() else {
        debug!("view unmounted before places loaded; discarding result");
        return;
    };

    let applied = state
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .finish_load(result);
    if !applied {
        debug!("places load settled with no load in flight");
    }
    let _ = loaded.send(true);
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
