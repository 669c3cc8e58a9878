//! Category provider - Cached, environment-aware access to the category list

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::OwnedMutexGuard;
use tokio::task::JoinHandle;

use crate::error::{CatalogError, CatalogResult};
use crate::fetch::{CatalogServices, FetchCategoriesTask};
use crate::model::CategoryRef;
use crate::platform::{LocaleTag, NetworkStatus};
use crate::receiver::CategoryReceiver;

/// Source of wallpaper categories for the picker UI
pub trait CategoryProvider: Send + Sync {
    /// Delivers every category to `receiver`, fetching them if needed.
    ///
    /// With a valid cache and no `force_refresh`, the cached categories are replayed
    /// before this returns. Otherwise the cache is cleared and a background fetch
    /// starts; use the returned handle to wait for it. Never panics for lack of a
    /// runtime.
    fn fetch(&self, receiver: Arc<dyn CategoryReceiver>, force_refresh: bool) -> FetchHandle;

    /// Number of cached categories, 0 until a fetch has completed.
    fn size(&self) -> usize;

    /// The category at `index` in arrival order.
    fn category_at(&self, index: usize) -> CatalogResult<CategoryRef>;

    fn category_by_id(&self, collection_id: &str) -> Option<CategoryRef>;

    fn is_fetched(&self) -> bool;

    /// Drops the cache if network status or locale changed since the last fetch.
    ///
    /// Returns true iff they changed. Before the first fetch there is nothing to
    /// compare against, which counts as a change.
    fn reset_if_needed(&self) -> bool;

    fn is_featured_collection_available(&self) -> bool;

    fn is_creative_category_available(&self) -> bool;
}

/// Handle to the background work started by [`CategoryProvider::fetch`]
#[derive(Debug)]
pub struct FetchHandle {
    task: Option<JoinHandle<()>>,
    cached: bool,
}

impl FetchHandle {
    fn cached() -> Self {
        Self {
            task: None,
            cached: true,
        }
    }

    fn completed() -> Self {
        Self {
            task: None,
            cached: false,
        }
    }

    fn spawned(task: JoinHandle<()>) -> Self {
        Self {
            task: Some(task),
            cached: false,
        }
    }

    /// True when the receiver was served from cache without a new traversal.
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits until the receiver has been told the fetch is done.
    pub async fn wait(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Category fetch task failed");
            }
        }
    }
}

/// Network status and locale seen by the last fetch.
///
/// Starts as `NotInitialized` with no locale, so a provider that never fetched
/// always reports drift.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct EnvironmentSnapshot {
    network: NetworkStatus,
    locale: Option<LocaleTag>,
}

#[derive(Debug, Default)]
struct CacheState {
    categories: Vec<CategoryRef>,
    fetched: bool,
    /// Bumped on every clear; runs started for an older generation stop writing.
    generation: u64,
    environment: EnvironmentSnapshot,
    fetched_at: Option<DateTime<Utc>>,
}

impl CacheState {
    fn clear(&mut self) {
        self.categories.clear();
        self.fetched = false;
        self.fetched_at = None;
        self.generation += 1;
    }
}

/// Default [`CategoryProvider`] backed by the fixed source traversal
///
/// Clones share the same cache.
#[derive(Clone)]
pub struct DefaultCategoryProvider {
    services: CatalogServices,
    state: Arc<Mutex<CacheState>>,
    // Held for the whole of a fetch so orchestrator runs never overlap.
    run_gate: Arc<tokio::sync::Mutex<()>>,
}

impl DefaultCategoryProvider {
    pub fn new(services: CatalogServices) -> Self {
        Self {
            services,
            state: Arc::new(Mutex::new(CacheState::default())),
            run_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn services(&self) -> &CatalogServices {
        &self.services
    }

    /// Snapshot of the cached categories, empty until a fetch has completed.
    pub fn categories(&self) -> Vec<CategoryRef> {
        let state = self.state.lock();
        if state.fetched {
            state.categories.clone()
        } else {
            Vec::new()
        }
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().fetched_at
    }

    fn environment(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            network: self.services.network.network_status(),
            locale: Some(self.services.locale.current_locale()),
        }
    }

    fn start(
        &self,
        gate: OwnedMutexGuard<()>,
        receiver: Arc<dyn CategoryReceiver>,
        force_refresh: bool,
    ) -> FetchHandle {
        let environment = self.environment();
        let generation = {
            let mut state = self.state.lock();
            state.environment = environment.clone();
            if !force_refresh && state.fetched {
                let cached = state.categories.clone();
                drop(state);

                tracing::debug!(count = cached.len(), "Replaying cached categories");
                for category in cached {
                    receiver.on_category_received(category);
                }
                receiver.done_fetching_categories();
                drop(gate);
                return FetchHandle::cached();
            }

            state.clear();
            tracing::info!(
                force_refresh,
                network = ?environment.network,
                locale = ?environment.locale,
                generation = state.generation,
                "Fetching categories"
            );
            state.generation
        };

        let forwarding: Arc<dyn CategoryReceiver> = Arc::new(CachingReceiver {
            inner: receiver,
            state: self.state.clone(),
            generation,
        });
        let task = FetchCategoriesTask::new(self.services.clone());
        let run = async move {
            let _gate = gate;
            task.run(forwarding).await;
        };
        match self.runtime() {
            Some(runtime) => FetchHandle::spawned(runtime.spawn(run)),
            None => {
                tracing::warn!("No Tokio runtime available, fetching on the calling thread");
                futures::executor::block_on(run);
                FetchHandle::completed()
            }
        }
    }

    fn runtime(&self) -> Option<Handle> {
        self.services
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
    }
}

impl CategoryProvider for DefaultCategoryProvider {
    /// Spawns onto the services' runtime, or the current one. With neither, the
    /// fetch runs to completion on the calling thread.
    fn fetch(&self, receiver: Arc<dyn CategoryReceiver>, force_refresh: bool) -> FetchHandle {
        if let Ok(gate) = self.run_gate.clone().try_lock_owned() {
            return self.start(gate, receiver, force_refresh);
        }

        tracing::debug!(force_refresh, "Fetch in flight, queueing request");
        match self.runtime() {
            Some(runtime) => {
                let provider = self.clone();
                FetchHandle::spawned(runtime.spawn(async move {
                    let gate = provider.run_gate.clone().lock_owned().await;
                    provider.start(gate, receiver, force_refresh).wait().await;
                }))
            }
            None => {
                let gate = futures::executor::block_on(self.run_gate.clone().lock_owned());
                self.start(gate, receiver, force_refresh)
            }
        }
    }

    fn size(&self) -> usize {
        let state = self.state.lock();
        if state.fetched {
            state.categories.len()
        } else {
            0
        }
    }

    fn category_at(&self, index: usize) -> CatalogResult<CategoryRef> {
        let state = self.state.lock();
        if !state.fetched {
            return Err(CatalogError::CategoriesUnavailable);
        }
        state
            .categories
            .get(index)
            .cloned()
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                size: state.categories.len(),
            })
    }

    fn category_by_id(&self, collection_id: &str) -> Option<CategoryRef> {
        self.state
            .lock()
            .categories
            .iter()
            .find(|category| category.collection_id() == collection_id)
            .cloned()
    }

    fn is_fetched(&self) -> bool {
        self.state.lock().fetched
    }

    fn reset_if_needed(&self) -> bool {
        let current = self.environment();
        let mut state = self.state.lock();
        if state.environment == current {
            return false;
        }

        tracing::info!(
            network = ?current.network,
            locale = ?current.locale,
            "Environment changed, dropping cached categories"
        );
        // The snapshot is only refreshed by the next fetch.
        state.clear();
        true
    }

    fn is_featured_collection_available(&self) -> bool {
        false
    }

    fn is_creative_category_available(&self) -> bool {
        false
    }
}

/// Appends each category to the provider cache, then relays it to the caller
struct CachingReceiver {
    inner: Arc<dyn CategoryReceiver>,
    state: Arc<Mutex<CacheState>>,
    generation: u64,
}

impl CategoryReceiver for CachingReceiver {
    fn on_category_received(&self, category: CategoryRef) {
        {
            let mut state = self.state.lock();
            if state.generation == self.generation {
                state.categories.push(category.clone());
            }
        }
        self.inner.on_category_received(category);
    }

    fn done_fetching_categories(&self) {
        {
            let mut state = self.state.lock();
            if state.generation == self.generation {
                state.fetched = true;
                state.fetched_at = Some(Utc::now());
                tracing::debug!(count = state.categories.len(), "Category cache valid");
            } else {
                tracing::debug!(
                    generation = self.generation,
                    current = state.generation,
                    "Discarding results of invalidated fetch"
                );
            }
        }
        self.inner.done_fetching_categories();
    }
}
