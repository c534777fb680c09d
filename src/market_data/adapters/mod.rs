// Shared trait + HTTP helper for venue adapters

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::engine::types::BookSnapshot;
use crate::error::{FetchError, FetchResult};

#[async_trait::async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Stable venue name, used as rate-limit key, log field and metric label.
    fn venue(&self) -> &'static str;

    /// One REST round trip. Errors are returned, not swallowed; degrading to
    /// an empty snapshot is the caller's decision.
    async fn fetch_snapshot(&self, client: &reqwest::Client) -> FetchResult<BookSnapshot>;
}

// GET `url` and decode the body as `T`, keeping the payload on decode failure
pub(crate) async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> FetchResult<T> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    trace!(url, %status, bytes = body.len(), "Venue response");

    if !status.is_success() {
        return Err(FetchError::HttpResponse { status, body });
    }

    serde_json::from_str::<T>(&body).map_err(|error| FetchError::Deserialise { error, payload: body })
}

pub mod coinbase;
pub mod coinbase_types;
pub mod gemini;
pub mod gemini_types;
