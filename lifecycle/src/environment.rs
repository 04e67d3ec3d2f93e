//! Environment for the lifecycle reducer.

use crate::transport::Transport;
use crate::types::Entity;
use composable_crud_core::environment::Clock;
use std::sync::Arc;

/// Dependencies of the lifecycle reducer: the transport it calls and the
/// clock it stamps completions with.
pub struct LifecycleEnvironment<E: Entity> {
    transport: Arc<dyn Transport<E>>,
    clock: Arc<dyn Clock>,
}

impl<E: Entity> LifecycleEnvironment<E> {
    /// Create a new environment.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport<E>>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Transport used by effects.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport<E> {
        self.transport.as_ref()
    }

    /// Clock for completion timestamps.
    ///
    /// Production uses `SystemClock`, tests use `FixedClock`.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl<E: Entity> Clone for LifecycleEnvironment<E> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            clock: Arc::clone(&self.clock),
        }
    }
}
