use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use shared::{domain::Recipe, error::SourceError, protocol::decode_random_response};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

pub mod deck;
pub mod gesture;
pub mod listeners;
pub mod presenter;
pub mod route;

pub use deck::{DeckError, Direction, SwipeDeck};
pub use gesture::{GestureInterpreter, InputEvent, NavKey, DEFAULT_SWIPE_THRESHOLD_PX};
pub use listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
pub use presenter::{
    apply_card_action, CardAction, CardModel, CardOutcome, CardScreen, CardView, Transition,
};
pub use route::{Route, Router};

pub const INITIAL_BATCH_SIZE: usize = 10;
pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// One random recipe per call. The upstream may repeat itself across calls.
    async fn fetch_random(&self) -> Result<Recipe, SourceError>;
}

#[derive(Clone)]
pub struct MealDbClient {
    http: Client,
    base_url: Url,
}

impl MealDbClient {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, SourceError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| SourceError::InvalidUrl(format!("{base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn random_url(&self) -> Result<Url, SourceError> {
        self.base_url
            .join("random.php")
            .map_err(|err| SourceError::InvalidUrl(err.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, SourceError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }

    pub async fn fetch_thumbnail(&self, thumbnail_url: &str) -> Result<Vec<u8>, SourceError> {
        let url = Url::parse(thumbnail_url)
            .map_err(|err| SourceError::InvalidUrl(format!("{thumbnail_url}: {err}")))?;
        self.get_bytes(url).await
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn fetch_random(&self) -> Result<Recipe, SourceError> {
        let body = self.get_bytes(self.random_url()?).await?;
        decode_random_response(&body)
    }
}

/// Concurrent startup fetches. Each slot is an independent task; a failed slot
/// is logged and dropped without touching the others.
///
/// Dropping the batch aborts whatever is still in flight, so no completion is
/// delivered after the owner is gone.
pub struct InitialBatch {
    tasks: Vec<JoinHandle<()>>,
}

impl InitialBatch {
    pub fn spawn<S, F>(source: Arc<S>, count: usize, sink: F) -> Self
    where
        S: RecipeSource + ?Sized + 'static,
        F: Fn(Recipe) + Send + Sync + 'static,
    {
        info!(count, "starting initial recipe fetches");
        let sink = Arc::new(sink);
        let tasks = (0..count)
            .map(|slot| {
                let source = Arc::clone(&source);
                let sink = Arc::clone(&sink);
                tokio::spawn(async move {
                    match source.fetch_random().await {
                        Ok(recipe) => {
                            debug!(slot, recipe_id = %recipe.id, "recipe fetched");
                            sink(recipe);
                        }
                        Err(err) => warn!(slot, error = %err, "recipe fetch failed"),
                    }
                })
            })
            .collect();
        Self { tasks }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    /// Waits for every slot to settle.
    pub async fn join(mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for result in join_all(tasks).await {
            if let Err(err) = result {
                if err.is_panic() {
                    warn!(error = %err, "recipe fetch task panicked");
                }
            }
        }
    }
}

impl Drop for InitialBatch {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
