//! # Composable CRUD Lifecycle
//!
//! Tracks the request lifecycle (`Idle`, `Loading`, `Succeeded`, `Failed`)
//! of asynchronous CRUD operations against a remote collection, and keeps a
//! local copy of that collection consistent with the server's responses.
//!
//! # Core Concepts
//!
//! - [`LifecycleState`]: the collection plus one [`OperationStatus`] per
//!   [`OperationKind`], the latest error, and the latest success message
//! - [`LifecycleAction`]: dispatches (`FetchAll`, `Create`, `Update`,
//!   `Delete`, `ClearMessages`) and their completions
//! - [`LifecycleReducer`]: pure state transitions; dispatches return one
//!   transport effect whose completion is fed back into the reducer
//! - [`Transport`]: the remote seam, backed by [`HttpTransport`] or
//!   [`MockTransport`]
//! - [`Tracker`]: awaitable facade returning a [`LifecycleView`]
//!
//! # Example
//!
//! ```ignore
//! use composable_crud_lifecycle::{HttpTransport, LifecycleEnvironment, Tracker};
//!
//! let transport = Arc::new(HttpTransport::<Book>::new("http://localhost:5000/api"));
//! let tracker = Tracker::new(LifecycleEnvironment::new(transport, Arc::new(SystemClock)));
//!
//! let view = tracker.create(BookDraft::new("Beloved", "Toni Morrison")).await?;
//! assert_eq!(view.success_message.as_deref(), Some("Book created successfully!"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod selectors;
pub mod tracker;
pub mod transport;
pub mod types;

pub use actions::LifecycleAction;
pub use environment::LifecycleEnvironment;
pub use error::TransportError;
pub use reducer::LifecycleReducer;
pub use selectors::{LifecycleView, find, format_error, is_loading, status_of};
pub use tracker::{LifecycleStore, Tracker};
pub use transport::{Gate, HttpTransport, MockTransport, Transport, TransportCall, TransportFuture};
pub use types::{
    Entity, LifecycleState, OperationKind, OperationStatus, Operations, RequestId, RequestState,
};
