//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::{RouteCache, RouteCacheConfig};
use crate::catalog::{CatalogError, CatalogLoader};
use crate::network::{Network, SharedNetwork};
use crate::route::{LogNotifier, Notifier, TrackerConfig};
use crate::session::Session;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current network snapshot
    pub network: SharedNetwork,

    /// The user's session
    pub session: Arc<Mutex<Session>>,

    /// Shortest paths per network generation
    pub routes: Arc<RouteCache>,

    /// Loader for reloads
    pub loader: Arc<CatalogLoader>,

    /// Route tracking configuration
    pub tracker: Arc<TrackerConfig>,

    /// Receives arrival events from the session's tracker
    pub notifier: Arc<dyn Notifier + Send + Sync>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: SharedNetwork, loader: CatalogLoader, tracker: TrackerConfig) -> Self {
        Self {
            network,
            session: Arc::new(Mutex::new(Session::new())),
            routes: Arc::new(RouteCache::new(&RouteCacheConfig::default())),
            loader: Arc::new(loader),
            tracker: Arc::new(tracker),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the arrival notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier + Send + Sync>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Load fresh data and swap in a new network snapshot.
    ///
    /// On failure the current snapshot stays in place. Cached paths are
    /// dropped. The session's route is replanned on the new snapshot; if that
    /// fails it is cleared.
    pub async fn reload(&self) -> Result<Arc<Network>, CatalogError> {
        let data = self.loader.load().await?;
        let network = self.network.replace(data).await;
        self.routes.clear();

        let mut session = self.session.lock().await;
        if let Err(e) = session.update_route(&network, &self.tracker) {
            warn!(error = %e, "Selected route no longer available after reload");
        }

        info!(
            generation = network.generation(),
            stations = network.catalog().len(),
            "Network reloaded"
        );
        Ok(network)
    }
}
