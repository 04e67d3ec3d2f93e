//! Integration tests for the Store with an environment-driven reducer.

use composable_crud_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};
use composable_crud_runtime::Store;
use composable_crud_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct JournalState {
    entries: Vec<String>,
}

#[derive(Debug, Clone)]
enum JournalAction {
    Write { text: String },
    WriteLater { text: String },
    Written { text: String },
}

#[derive(Clone)]
struct JournalEnvironment {
    clock: Arc<dyn Clock>,
}

#[derive(Clone)]
struct JournalReducer;

impl Reducer for JournalReducer {
    type State = JournalState;
    type Action = JournalAction;
    type Environment = JournalEnvironment;

    fn reduce(
        &self,
        state: &mut JournalState,
        action: JournalAction,
        env: &JournalEnvironment,
    ) -> SmallVec<[Effect<JournalAction>; 4]> {
        match action {
            JournalAction::Write { text } | JournalAction::Written { text } => {
                state
                    .entries
                    .push(format!("{} {text}", env.clock.now().to_rfc3339()));
                SmallVec::new()
            },
            JournalAction::WriteLater { text } => smallvec![Effect::future(async move {
                tokio::task::yield_now().await;
                Some(JournalAction::Written { text })
            })],
        }
    }
}

fn journal() -> Store<JournalState, JournalAction, JournalEnvironment, JournalReducer> {
    let env = JournalEnvironment {
        clock: Arc::new(test_clock()),
    };
    Store::new(JournalState::default(), JournalReducer, env)
}

#[tokio::test]
async fn test_reducer_sees_injected_clock() {
    let store = journal();
    let _ = store
        .send(JournalAction::Write {
            text: "hello".to_string(),
        })
        .await;

    let entries = store.state(|s| s.entries.clone()).await;
    assert_eq!(entries, vec!["2025-01-01T00:00:00+00:00 hello".to_string()]);
}

#[tokio::test]
async fn test_observers_receive_effect_actions() {
    let store = journal();
    let mut rx = store.subscribe_actions();

    let mut handle = store
        .send(JournalAction::WriteLater {
            text: "deferred".to_string(),
        })
        .await
        .expect("store accepts actions");
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("effect completes");

    let observed = rx.recv().await.expect("action broadcast");
    assert!(matches!(observed, JournalAction::Written { ref text } if text == "deferred"));
    assert_eq!(store.state(|s| s.entries.len()).await, 1);
}

#[tokio::test]
async fn test_concurrent_senders_serialize_at_reducer() {
    let store = journal();

    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                let _ = store
                    .send(JournalAction::Write {
                        text: n.to_string(),
                    })
                    .await;
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("sender task");
    }

    assert_eq!(store.state(|s| s.entries.len()).await, 16);
}
