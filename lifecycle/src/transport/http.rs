//! HTTP transport over the catalog's JSON envelope.
//!
//! Success bodies look like `{"success": true, "data": ...}`; failures look
//! like `{"success": false, "error": "..." | ["...", ...]}`.

use super::{Transport, TransportFuture};
use crate::error::TransportError;
use crate::types::{Entity, OperationKind};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// [`Transport`] that speaks to a catalog-style REST API with `reqwest`.
///
/// Requests go to `{api_base}/{E::COLLECTION}` and `{api_base}/{E::COLLECTION}/{id}`.
pub struct HttpTransport<E> {
    client: Client,
    collection_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpTransport<E> {
    /// Transport rooted at `api_base`, e.g. `http://localhost:5000/api`.
    #[must_use]
    pub fn new(api_base: &str) -> Self {
        Self::with_client(api_base, Client::new())
    }

    /// Transport using a preconfigured client (timeouts, TLS, proxies).
    #[must_use]
    pub fn with_client(api_base: &str, client: Client) -> Self {
        Self {
            client,
            collection_url: format!("{}/{}", api_base.trim_end_matches('/'), E::COLLECTION),
            _entity: PhantomData,
        }
    }

    /// URL of the collection resource.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn member_url(&self, id: &E::Id) -> String {
        format!("{}/{id}", self.collection_url)
    }
}

impl<E> Clone for HttpTransport<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection_url: self.collection_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for HttpTransport<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("collection_url", &self.collection_url)
            .finish_non_exhaustive()
    }
}

impl<E> Transport<E> for HttpTransport<E>
where
    E: Entity + DeserializeOwned,
    E::Draft: Serialize,
    E::Patch: Serialize,
{
    fn list(&self) -> TransportFuture<Vec<E>> {
        let request = self.client.get(&self.collection_url);
        Box::pin(execute::<E, _>(request, OperationKind::FetchAll))
    }

    fn create(&self, draft: E::Draft) -> TransportFuture<E> {
        let request = self.client.post(&self.collection_url).json(&draft);
        Box::pin(execute::<E, _>(request, OperationKind::Create))
    }

    fn update(&self, id: E::Id, patch: E::Patch) -> TransportFuture<E> {
        let request = self.client.put(self.member_url(&id)).json(&patch);
        Box::pin(execute::<E, _>(request, OperationKind::Update))
    }

    fn delete(&self, id: E::Id) -> TransportFuture<()> {
        let request = self.client.delete(self.member_url(&id));
        Box::pin(async move {
            execute::<E, IgnoredAny>(request, OperationKind::Delete).await?;
            Ok(())
        })
    }
}

#[derive(Deserialize)]
struct SuccessBody<T> {
    data: T,
}

#[derive(Deserialize)]
struct FailureBody {
    error: FailureDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FailureDetail {
    Message(String),
    Fields(Vec<String>),
}

impl FailureDetail {
    fn into_messages(self) -> Vec<String> {
        match self {
            Self::Message(message) => vec![message],
            Self::Fields(messages) => messages,
        }
    }
}

fn generic_failure<E: Entity>(kind: OperationKind) -> String {
    format!("Failed to {} {}", kind.verb(), E::COLLECTION)
}

async fn execute<E: Entity, T: DeserializeOwned>(
    request: RequestBuilder,
    kind: OperationKind,
) -> Result<T, TransportError> {
    let response = request.send().await.map_err(|error| {
        tracing::warn!(operation = kind.as_str(), %error, "Request did not complete");
        TransportError::Transport(generic_failure::<E>(kind))
    })?;

    let status = response.status();

    if status.is_success() {
        let body: SuccessBody<T> = response.json().await.map_err(|error| {
            tracing::warn!(operation = kind.as_str(), %error, "Malformed success body");
            TransportError::Transport(generic_failure::<E>(kind))
        })?;
        return Ok(body.data);
    }

    let detail = response.json::<FailureBody>().await.ok().map(|body| body.error);
    tracing::debug!(operation = kind.as_str(), %status, "Server rejected request");

    Err(match status {
        StatusCode::BAD_REQUEST => TransportError::Validation(
            detail.map_or_else(|| vec![generic_failure::<E>(kind)], FailureDetail::into_messages),
        ),
        StatusCode::NOT_FOUND => TransportError::NotFound(
            detail
                .map(|d| d.into_messages().join("; "))
                .unwrap_or_else(|| format!("{} not found", E::LABEL)),
        ),
        _ => TransportError::Transport(
            detail
                .map(|d| d.into_messages().join("; "))
                .unwrap_or_else(|| generic_failure::<E>(kind)),
        ),
    })
}
