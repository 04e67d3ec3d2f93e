//! Scripted in-memory transport for tests.
//!
//! Each operation has a queue of outcomes. An outcome is either ready
//! immediately or held behind a [`Gate`] that the test resolves later,
//! which is how overlapping requests are made to complete out of order.

use super::{Transport, TransportFuture};
use crate::error::TransportError;
use crate::types::{Entity, OperationKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

/// One call observed by a [`MockTransport`].
#[derive(Debug, Clone)]
pub enum TransportCall<E: Entity> {
    /// `list()`
    List,
    /// `create(draft)`
    Create(E::Draft),
    /// `update(id, patch)`
    Update(E::Id, E::Patch),
    /// `delete(id)`
    Delete(E::Id),
}

impl<E: Entity> TransportCall<E> {
    /// Operation kind of this call.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::List => OperationKind::FetchAll,
            Self::Create(_) => OperationKind::Create,
            Self::Update(..) => OperationKind::Update,
            Self::Delete(_) => OperationKind::Delete,
        }
    }
}

enum Scripted<T> {
    Ready(Result<T, TransportError>),
    Gated(oneshot::Receiver<Result<T, TransportError>>),
}

impl<T: Send + 'static> Scripted<T> {
    fn into_call(self) -> TransportFuture<T> {
        Box::pin(async move {
            match self {
                Self::Ready(result) => result,
                Self::Gated(rx) => rx.await.unwrap_or_else(|_| {
                    Err(TransportError::Transport("Gate dropped".to_string()))
                }),
            }
        })
    }
}

/// Handle that completes one gated call.
#[derive(Debug)]
pub struct Gate<T> {
    tx: oneshot::Sender<Result<T, TransportError>>,
}

impl<T> Gate<T> {
    /// Complete the held call with `result`.
    pub fn resolve(self, result: Result<T, TransportError>) {
        // The receiver is gone only if the effect was dropped.
        let _ = self.tx.send(result);
    }
}

struct Script<E: Entity> {
    list: VecDeque<Scripted<Vec<E>>>,
    create: VecDeque<Scripted<E>>,
    update: VecDeque<Scripted<E>>,
    delete: VecDeque<Scripted<()>>,
    calls: Vec<TransportCall<E>>,
}

/// In-memory [`Transport`] answering from per-operation queues.
///
/// A call with nothing queued fails with `TransportError::Transport`.
pub struct MockTransport<E: Entity> {
    script: Arc<Mutex<Script<E>>>,
}

impl<E: Entity> Default for MockTransport<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for MockTransport<E> {
    fn clone(&self) -> Self {
        Self {
            script: Arc::clone(&self.script),
        }
    }
}

fn unscripted<T>(kind: OperationKind) -> Scripted<T> {
    Scripted::Ready(Err(TransportError::Transport(format!(
        "No response scripted for {}",
        kind.as_str()
    ))))
}

fn gate<T>() -> (Gate<T>, Scripted<T>) {
    let (tx, rx) = oneshot::channel();
    (Gate { tx }, Scripted::Gated(rx))
}

impl<E: Entity> MockTransport<E> {
    /// Empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                list: VecDeque::new(),
                create: VecDeque::new(),
                update: VecDeque::new(),
                delete: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script<E>> {
        // A poisoned script only means another test thread panicked.
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue the outcome of the next `list()`.
    pub fn push_list(&self, result: Result<Vec<E>, TransportError>) {
        self.script().list.push_back(Scripted::Ready(result));
    }

    /// Queue the outcome of the next `create()`.
    pub fn push_create(&self, result: Result<E, TransportError>) {
        self.script().create.push_back(Scripted::Ready(result));
    }

    /// Queue the outcome of the next `update()`.
    pub fn push_update(&self, result: Result<E, TransportError>) {
        self.script().update.push_back(Scripted::Ready(result));
    }

    /// Queue the outcome of the next `delete()`.
    pub fn push_delete(&self, result: Result<(), TransportError>) {
        self.script().delete.push_back(Scripted::Ready(result));
    }

    /// Hold the next `list()` until the returned gate is resolved.
    #[must_use]
    pub fn gate_list(&self) -> Gate<Vec<E>> {
        let (gate, scripted) = gate();
        self.script().list.push_back(scripted);
        gate
    }

    /// Hold the next `create()` until the returned gate is resolved.
    #[must_use]
    pub fn gate_create(&self) -> Gate<E> {
        let (gate, scripted) = gate();
        self.script().create.push_back(scripted);
        gate
    }

    /// Hold the next `update()` until the returned gate is resolved.
    #[must_use]
    pub fn gate_update(&self) -> Gate<E> {
        let (gate, scripted) = gate();
        self.script().update.push_back(scripted);
        gate
    }

    /// Hold the next `delete()` until the returned gate is resolved.
    #[must_use]
    pub fn gate_delete(&self) -> Gate<()> {
        let (gate, scripted) = gate();
        self.script().delete.push_back(scripted);
        gate
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<TransportCall<E>> {
        self.script().calls.clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.script().calls.len()
    }
}

impl<E: Entity> Transport<E> for MockTransport<E> {
    fn list(&self) -> TransportFuture<Vec<E>> {
        let mut script = self.script();
        script.calls.push(TransportCall::List);
        script
            .list
            .pop_front()
            .unwrap_or_else(|| unscripted(OperationKind::FetchAll))
            .into_call()
    }

    fn create(&self, draft: E::Draft) -> TransportFuture<E> {
        let mut script = self.script();
        script.calls.push(TransportCall::Create(draft));
        script
            .create
            .pop_front()
            .unwrap_or_else(|| unscripted(OperationKind::Create))
            .into_call()
    }

    fn update(&self, id: E::Id, patch: E::Patch) -> TransportFuture<E> {
        let mut script = self.script();
        script.calls.push(TransportCall::Update(id, patch));
        script
            .update
            .pop_front()
            .unwrap_or_else(|| unscripted(OperationKind::Update))
            .into_call()
    }

    fn delete(&self, id: E::Id) -> TransportFuture<()> {
        let mut script = self.script();
        script.calls.push(TransportCall::Delete(id));
        script
            .delete
            .pop_front()
            .unwrap_or_else(|| unscripted(OperationKind::Delete))
            .into_call()
    }
}
