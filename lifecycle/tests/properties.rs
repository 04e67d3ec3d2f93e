//! Property tests for collection consistency.

#![allow(clippy::unwrap_used)] // Test code

mod common;

use common::{Book, BookPatch, book, draft};
use composable_crud_core::reducer::Reducer;
use composable_crud_lifecycle::{
    LifecycleAction, LifecycleEnvironment, LifecycleReducer, LifecycleState, MockTransport,
    RequestId, TransportError,
};
use composable_crud_testing::test_clock;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Step {
    Create,
    Update(usize),
    Delete(usize),
    Fetch,
    Fail,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Create),
        2 => (0usize..8).prop_map(Step::Update),
        2 => (0usize..8).prop_map(Step::Delete),
        1 => Just(Step::Fetch),
        1 => Just(Step::Fail),
    ]
}

/// Server-side model: assigns increasing ids and never reuses them.
struct Server {
    records: Vec<Book>,
    next_id: u64,
}

impl Server {
    fn pick(&self, index: usize) -> Option<u64> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.records[index % self.records.len()].id)
        }
    }
}

fn reduce_all(
    reducer: &LifecycleReducer<Book>,
    state: &mut LifecycleState<Book>,
    env: &LifecycleEnvironment<Book>,
    actions: Vec<LifecycleAction<Book>>,
) {
    for action in actions {
        let _effects = reducer.reduce(state, action, env);
    }
}

fn ids_unique(state: &LifecycleState<Book>) -> bool {
    let ids: HashSet<u64> = state.collection.iter().map(|b| b.id).collect();
    ids.len() == state.collection.len()
}

proptest! {
    #[test]
    fn collection_ids_stay_unique(steps in prop::collection::vec(step(), 1..40)) {
        let reducer = LifecycleReducer::new();
        let env = LifecycleEnvironment::new(Arc::new(MockTransport::new()), Arc::new(test_clock()));
        let mut state = LifecycleState::new();
        let mut server = Server { records: Vec::new(), next_id: 1 };

        for step in steps {
            let request = RequestId::new();
            let actions = match step {
                Step::Create => {
                    let created = book(server.next_id, "Draft");
                    server.next_id += 1;
                    server.records.push(created.clone());
                    vec![
                        LifecycleAction::Create { request, draft: draft("Draft") },
                        LifecycleAction::Created { request, result: Ok(created) },
                    ]
                },
                Step::Update(index) => match server.pick(index) {
                    Some(id) => {
                        let updated = book(id, "Revised");
                        if let Some(slot) = server.records.iter_mut().find(|b| b.id == id) {
                            *slot = updated.clone();
                        }
                        vec![
                            LifecycleAction::Update { request, id, patch: BookPatch::default() },
                            LifecycleAction::Updated { request, id, result: Ok(updated) },
                        ]
                    },
                    None => Vec::new(),
                },
                Step::Delete(index) => match server.pick(index) {
                    Some(id) => {
                        server.records.retain(|b| b.id != id);
                        vec![
                            LifecycleAction::Delete { request, id },
                            LifecycleAction::Deleted { request, id, result: Ok(()) },
                        ]
                    },
                    None => Vec::new(),
                },
                Step::Fetch => vec![
                    LifecycleAction::FetchAll { request },
                    LifecycleAction::Fetched { request, result: Ok(server.records.clone()) },
                ],
                Step::Fail => vec![
                    LifecycleAction::FetchAll { request },
                    LifecycleAction::Fetched {
                        request,
                        result: Err(TransportError::Transport("Failed to fetch books".to_string())),
                    },
                ],
            };

            reduce_all(&reducer, &mut state, &env, actions);
            prop_assert!(ids_unique(&state));
        }

        // Every successful completion was applied, so the mirror matches the server.
        prop_assert_eq!(&state.collection, &server.records);
    }

    #[test]
    fn create_completion_racing_fetch_never_duplicates(existing in 0u64..5) {
        let reducer = LifecycleReducer::new();
        let env = LifecycleEnvironment::new(Arc::new(MockTransport::new()), Arc::new(test_clock()));
        let mut state = LifecycleState::new();

        let mut server: Vec<Book> = (1..=existing).map(|id| book(id, "Seed")).collect();
        let created = book(existing + 1, "New");
        server.push(created.clone());

        let create = RequestId::new();
        let fetch = RequestId::new();
        reduce_all(&reducer, &mut state, &env, vec![
            LifecycleAction::Create { request: create, draft: draft("New") },
            LifecycleAction::FetchAll { request: fetch },
            LifecycleAction::Fetched { request: fetch, result: Ok(server.clone()) },
            LifecycleAction::Created { request: create, result: Ok(created) },
        ]);

        prop_assert!(ids_unique(&state));
        prop_assert_eq!(&state.collection, &server);
    }
}
