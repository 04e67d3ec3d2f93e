//! The seam between the reducer and the server.
//!
//! The reducer never talks HTTP itself: its effects call a [`Transport`],
//! which production code backs with [`HttpTransport`] and tests back with
//! [`MockTransport`].

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::{Gate, MockTransport, TransportCall};

use crate::error::TransportError;
use crate::types::Entity;
use futures::future::BoxFuture;

/// Future returned by every transport call.
///
/// `'static` so the store can spawn it without borrowing the environment.
pub type TransportFuture<T> = BoxFuture<'static, Result<T, TransportError>>;

/// Remote CRUD operations over one collection.
pub trait Transport<E: Entity>: Send + Sync {
    /// List the whole collection in server order.
    fn list(&self) -> TransportFuture<Vec<E>>;

    /// Create a record; the server assigns its id.
    fn create(&self, draft: E::Draft) -> TransportFuture<E>;

    /// Partially update a record and return the server's representation.
    fn update(&self, id: E::Id, patch: E::Patch) -> TransportFuture<E>;

    /// Delete a record.
    fn delete(&self, id: E::Id) -> TransportFuture<()>;
}
