//! Client-side core of the Mars rovers dashboard: state container, view
//! composers, render cycle and the interaction handlers that drive them.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub mod provider;
pub mod render;
pub mod state;
pub mod surface;
pub mod view;

pub use provider::{HttpRoverProvider, ProviderError, RoverDataProvider};
pub use render::{render, Store};
pub use state::{AppState, StateError, StatePatch};
pub use surface::{Action, HeadlessSurface, Surface};
pub use view::{Control, ControlKind, Markup};

/// Terminal state of one rover-selection interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    ManifestFailed,
    PhotosFailed,
    PhotosReceived { count: usize },
}

/// Result of dispatching one action.
#[derive(Debug)]
pub enum Dispatched {
    /// Whether the toggle matched a filter and caused a merge.
    Toggled(bool),
    /// Fire-and-forget selection task; awaiting it is optional.
    Selection(JoinHandle<SelectionOutcome>),
}

/// The dashboard session: one store, one data provider.
///
/// The store lock is only ever held for a merge plus its render, never across
/// an await point, so renders always observe a whole snapshot.
pub struct Dashboard<P, S> {
    store: Mutex<Store<S>>,
    provider: P,
    ready: AtomicBool,
}

impl<P, S> Dashboard<P, S>
where
    P: RoverDataProvider + 'static,
    S: Surface + 'static,
{
    pub fn new(provider: P, surface: S) -> Self {
        Self::with_state(provider, surface, AppState::initial())
    }

    pub fn with_state(provider: P, surface: S, state: AppState) -> Self {
        Self {
            store: Mutex::new(Store::new(state, surface)),
            provider,
            ready: AtomicBool::new(false),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store<S>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hosting environment's ready signal: performs the initial render once.
    pub fn on_ready(&self) -> bool {
        if self.ready.swap(true, Ordering::SeqCst) {
            debug!("ignoring repeated ready signal");
            return false;
        }
        info!("surface ready; performing initial render");
        self.store().render();
        true
    }

    /// Current snapshot.
    pub fn state(&self) -> AppState {
        self.store().state().clone()
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.store().surface())
    }

    /// Merges `patch` and renders the result.
    pub fn update(&self, patch: StatePatch) {
        self.store().update(patch);
    }

    /// Resolves a click against the currently bound controls and dispatches it.
    pub fn click(self: &Arc<Self>, kind: ControlKind, value: &str) -> Option<Dispatched> {
        let action = self.store().surface().resolve_click(kind, value);
        match action {
            Some(action) => Some(self.dispatch(action)),
            None => {
                debug!(kind = ?kind, value, "click on unbound control ignored");
                None
            }
        }
    }

    pub fn dispatch(self: &Arc<Self>, action: Action) -> Dispatched {
        debug!(command = action.name(), "dispatching ui action");
        match action {
            Action::ToggleFilter { label } => Dispatched::Toggled(self.toggle_filter(&label)),
            Action::SelectRover { name } => {
                let dashboard = Arc::clone(self);
                Dispatched::Selection(tokio::spawn(async move {
                    dashboard.select_rover(&name).await
                }))
            }
        }
    }

    /// Inverts the filter with this label; unknown labels are a no-op.
    pub fn toggle_filter(&self, label: &str) -> bool {
        let mut store = self.store();
        let Some(filter) = store.state().find_filter(label).map(|f| f.toggled()) else {
            debug!(label, "toggle target matches no filter");
            return false;
        };
        debug!(label, selected = filter.selected, "toggling filter");
        store.update(StatePatch::filter(filter));
        true
    }

    /// Fetches the manifest, then the most recent photos, merging each on arrival.
    pub async fn select_rover(&self, value: &str) -> SelectionOutcome {
        let rover = value.trim().to_ascii_lowercase();
        info!(rover = %rover, "rover selected; requesting manifest");

        let manifest = match self.provider.manifest(&rover).await {
            Ok(manifest) => manifest,
            Err(error) => {
                warn!(rover = %rover, %error, "manifest request failed");
                return SelectionOutcome::ManifestFailed;
            }
        };

        let date = manifest.max_date.clone();
        self.update(StatePatch::data(manifest));
        debug!(rover = %rover, date = %date, "manifest merged; requesting photos");

        match self.provider.photos(&rover, &date).await {
            Ok(photos) => {
                let count = photos.len();
                self.update(StatePatch::photos(photos));
                info!(rover = %rover, date = %date, count, "photos merged");
                SelectionOutcome::PhotosReceived { count }
            }
            Err(error) => {
                warn!(rover = %rover, date = %date, %error, "photo request failed");
                SelectionOutcome::PhotosFailed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
