//! Superseding catalog loader.

use crate::client::CatalogClient;
use crate::error::{CatalogClientError, Result};
use plvylist_core::{Catalog, CatalogLoadError, CatalogSource, MediaTag, TrackRecord};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Default)]
struct LoaderState {
    generation: u64,
    in_flight: Option<CancellationToken>,
    cached: Option<(String, Catalog)>,
}

/// Loads catalogs one at a time, newest wins.
///
/// Starting a load cancels the one in flight, which then resolves to
/// [`CatalogClientError::Superseded`]. The last successfully fetched URI is
/// cached so reloading it does not hit the network.
pub struct CatalogLoader {
    client: CatalogClient,
    state: Mutex<LoaderState>,
}

impl CatalogLoader {
    /// Create a loader over `client`.
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: Mutex::new(LoaderState::default()),
        }
    }

    /// Pick a source by precedence and load it.
    ///
    /// Inline records win over `uri`, which wins over markup.
    pub async fn resolve_and_load(
        &self,
        inline: Option<Vec<TrackRecord>>,
        uri: Option<&str>,
        markup: Vec<MediaTag>,
    ) -> Result<Catalog> {
        match CatalogSource::resolve(inline, uri, markup) {
            Some(source) => self.load(source).await,
            None => {
                // Still supersedes whatever was loading
                self.begin().await;
                Err(CatalogLoadError::NoSource.into())
            }
        }
    }

    /// Load a catalog from `source`.
    pub async fn load(&self, source: CatalogSource) -> Result<Catalog> {
        let kind = source.kind();
        let (generation, token) = self.begin().await;

        debug!(generation, source = kind, "Starting catalog load");

        let uri = match source.into_local_catalog() {
            Ok(result) => return Ok(result?),
            Err(uri) => uri,
        };

        if let Some(catalog) = self.cached(&uri).await {
            debug!(uri = %uri, "Catalog served from cache");
            return Ok(catalog);
        }

        let result = tokio::select! {
            () = token.cancelled() => Err(CatalogClientError::Superseded),
            result = self.client.fetch(&uri) => result,
        };

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(uri = %uri, generation, "Dropping superseded catalog load");
            return Err(CatalogClientError::Superseded);
        }
        state.in_flight = None;

        let catalog = result?;
        info!(uri = %uri, tracks = catalog.len(), "Catalog loaded");
        state.cached = Some((uri, catalog.clone()));

        Ok(catalog)
    }

    /// Cancel the load in flight, if any.
    pub async fn cancel(&self) {
        self.begin().await;
    }

    /// Forget the cached catalog so the next load refetches.
    pub async fn invalidate(&self) {
        self.state.lock().await.cached = None;
    }

    /// Start a new generation, cancelling the previous one.
    async fn begin(&self) -> (u64, CancellationToken) {
        let mut state = self.state.lock().await;

        state.generation += 1;
        if let Some(previous) = state.in_flight.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        state.in_flight = Some(token.clone());

        (state.generation, token)
    }

    async fn cached(&self, uri: &str) -> Option<Catalog> {
        let state = self.state.lock().await;

        state
            .cached
            .as_ref()
            .filter(|(cached_uri, _)| cached_uri == uri)
            .map(|(_, catalog)| catalog.clone())
    }
}
