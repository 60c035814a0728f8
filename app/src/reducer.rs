//! Reducer logic for the task list.
//!
//! Five action kinds, one match arm each. Mutations of `todos` return a
//! persistence effect carrying the new list; the store runs it after the
//! reducer returns.

use crate::environment::{TaskStorage, TodoEnvironment};
use crate::error::TodoError;
use crate::types::{ActionRecord, Task, TaskId, TodoAction, TodoState};
use std::sync::Arc;
use tasklist_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

/// Effects returned by [`TodoReducer`]
pub type TodoEffects = SmallVec<[Effect; 4]>;

/// Reducer for the task list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Record-level dispatch: decode, then reduce a copy of `state`
    ///
    /// `state` itself is never touched. Effects are returned unexecuted.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::UnrecognizedAction`] when `record.kind` is not a
    /// known action.
    pub fn dispatch(
        &self,
        state: &TodoState,
        record: ActionRecord,
        env: &TodoEnvironment,
    ) -> Result<(TodoState, TodoEffects), TodoError> {
        let action = TodoAction::try_from(record)?;
        let mut next = state.clone();
        let effects = self.reduce(&mut next, action, env);
        Ok((next, effects))
    }

    /// Milliseconds from the clock, stepped past any id already in use
    fn next_id(state: &TodoState, clock: &dyn Clock) -> TaskId {
        let mut id = clock.now().timestamp_millis();
        while state.contains(TaskId::new(id)) {
            id = id.wrapping_add(1);
        }
        TaskId::new(id)
    }

    /// Write-through of the current list, if a gateway is configured
    fn persist(env: &TodoEnvironment, todos: &[Task]) -> Effect {
        let Some(storage) = env.storage.as_ref().map(Arc::clone) else {
            return Effect::None;
        };
        let snapshot = todos.to_vec();
        Effect::run(move || {
            if let Err(error) = storage.save(&snapshot) {
                tracing::warn!(key = storage.key(), %error, "Failed to persist task list");
                metrics::counter!("storage.saves.failed").increment(1);
            }
        })
    }

    /// Replace every task carrying `id`; returns how many matched
    fn update_matching<F>(state: &mut TodoState, id: TaskId, update: F) -> usize
    where
        F: Fn(&Task) -> Task,
    {
        let mut matched = 0;
        for task in state.todos.iter_mut().filter(|t| t.id == id) {
            *task = update(task);
            matched += 1;
        }
        matched
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        tracing::debug!(kind = action.kind(), "Reducing action");

        match action {
            TodoAction::ChangedDraft { next_draft } => {
                state.draft = next_draft.unwrap_or_default();
                SmallVec::new()
            },

            // Emptiness is checked by the caller before dispatch
            TodoAction::AddedTodo => {
                let id = Self::next_id(state, env.clock.as_ref());
                let text = std::mem::take(&mut state.draft);
                state.todos.insert(0, Task::new(id, text));
                tracing::info!(%id, count = state.todos.len(), "Task added");
                smallvec![Self::persist(env, &state.todos)]
            },

            TodoAction::RemovedTodo { id: Some(id) } => {
                let before = state.todos.len();
                state.todos.retain(|t| t.id != id);
                if state.todos.len() == before {
                    return SmallVec::new();
                }
                tracing::info!(%id, count = state.todos.len(), "Task removed");
                smallvec![Self::persist(env, &state.todos)]
            },

            TodoAction::ToggleTodo { id: Some(id) } => {
                let matched = Self::update_matching(state, id, Task::toggled);
                if matched == 0 {
                    return SmallVec::new();
                }
                tracing::info!(%id, matched, "Task toggled");
                smallvec![Self::persist(env, &state.todos)]
            },

            TodoAction::EditTodo {
                id: Some(id),
                next_draft: Some(text),
            } => {
                let matched = Self::update_matching(state, id, |t| t.with_text(text.clone()));
                if matched == 0 {
                    return SmallVec::new();
                }
                tracing::info!(%id, matched, "Task edited");
                smallvec![Self::persist(env, &state.todos)]
            },

            // Missing target or payload
            TodoAction::RemovedTodo { id: None }
            | TodoAction::ToggleTodo { id: None }
            | TodoAction::EditTodo { .. } => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::kind;
    use proptest::prelude::*;
    use tasklist_testing::{ReducerTest, assertions, test_clock};

    fn task(id: i64, text: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            text: text.to_string(),
            completed,
        }
    }

    fn two_tasks() -> TodoState {
        TodoState::with_todos(vec![task(1, "first", false), task(2, "second", true)])
    }

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(MemoryStorage::default()))
    }

    #[test]
    fn test_changed_draft_sets_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::changed_draft("Buy milk"))
            .then_state(|state| {
                assert_eq!(state.draft, "Buy milk");
                assert!(state.todos.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_changed_draft_without_text_clears() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                draft: "half typed".to_string(),
                todos: Vec::new(),
            })
            .when_action(TodoAction::ChangedDraft { next_draft: None })
            .then_state(|state| assert_eq!(state.draft, ""))
            .run();
    }

    #[test]
    fn test_added_todo_prepends_and_clears_draft() {
        let expected_id = TaskId::new(test_clock().now().timestamp_millis());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                draft: "x".to_string(),
                todos: vec![task(1, "older", false)],
            })
            .when_action(TodoAction::AddedTodo)
            .then_state(move |state| {
                assert_eq!(state.draft, "");
                assert_eq!(state.count(), 2);
                assert_eq!(state.todos[0], Task::new(expected_id, "x".to_string()));
                assert_eq!(state.todos[1].id, TaskId::new(1));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_run_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_added_todo_accepts_empty_draft() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddedTodo)
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.todos[0].text, "");
            })
            .run();
    }

    #[test]
    fn test_added_todo_ids_stay_unique_with_frozen_clock() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::changed_draft("a"))
            .when_action(TodoAction::AddedTodo)
            .when_action(TodoAction::changed_draft("b"))
            .when_action(TodoAction::AddedTodo)
            .when_action(TodoAction::changed_draft("c"))
            .when_action(TodoAction::AddedTodo)
            .then_state(|state| {
                let mut ids: Vec<_> = state.ids().collect();
                assert_eq!(ids.len(), 3);
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 3);
                let texts: Vec<_> = state.todos.iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, vec!["c", "b", "a"]);
            })
            .run();
    }

    #[test]
    fn test_removed_todo_keeps_order() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::with_todos(vec![
                task(1, "a", false),
                task(2, "b", false),
                task(3, "c", false),
            ]))
            .when_action(TodoAction::remove(TaskId::new(2)))
            .then_state(|state| {
                assert_eq!(state.ids().collect::<Vec<_>>(), vec![TaskId::new(1), TaskId::new(3)]);
            })
            .then_effects(assertions::assert_has_run_effect)
            .run();
    }

    #[test]
    fn test_toggle_flips_only_target() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_tasks())
            .when_action(TodoAction::toggle(TaskId::new(1)))
            .then_state(|state| {
                assert!(state.todos[0].completed);
                assert!(state.todos[1].completed);
                assert_eq!(state.todos[0].text, "first");
            })
            .then_effects(assertions::assert_has_run_effect)
            .run();
    }

    #[test]
    fn test_duplicate_ids_are_all_targeted() {
        let seeded = || {
            TodoState::with_todos(vec![
                task(7, "copy one", false),
                task(8, "other", false),
                task(7, "copy two", true),
            ])
        };

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(seeded())
            .when_action(TodoAction::toggle(TaskId::new(7)))
            .then_state(|state| {
                assert!(state.todos[0].completed);
                assert!(!state.todos[1].completed);
                assert!(!state.todos[2].completed);
            })
            .then_effects(assertions::assert_has_run_effect)
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(seeded())
            .when_action(TodoAction::edit(TaskId::new(7), "same"))
            .then_state(|state| {
                assert_eq!(state.todos[0], task(7, "same", false));
                assert_eq!(state.todos[2], task(7, "same", true));
            })
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(seeded())
            .when_action(TodoAction::remove(TaskId::new(7)))
            .then_state(|state| assert_eq!(state.todos, vec![task(8, "other", false)]))
            .then_effects(assertions::assert_has_run_effect)
            .run();
    }

    #[test]
    fn test_edit_replaces_text_in_place() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(two_tasks())
            .when_action(TodoAction::edit(TaskId::new(2), "renamed"))
            .then_state(|state| {
                assert_eq!(state.todos[1], task(2, "renamed", true));
                assert_eq!(state.todos[0], task(1, "first", false));
            })
            .then_effects(assertions::assert_has_run_effect)
            .run();
    }

    #[test]
    fn test_missing_fields_are_noops() {
        for action in [
            TodoAction::RemovedTodo { id: None },
            TodoAction::ToggleTodo { id: None },
            TodoAction::EditTodo {
                id: None,
                next_draft: Some("x".to_string()),
            },
            TodoAction::EditTodo {
                id: Some(TaskId::new(1)),
                next_draft: None,
            },
        ] {
            ReducerTest::new(TodoReducer::new())
                .with_env(create_test_env())
                .given_state(two_tasks())
                .when_action(action)
                .then_state(|state| assert_eq!(*state, two_tasks()))
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn test_without_storage_mutations_have_no_effects() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::ephemeral(Arc::new(test_clock())))
            .given_state(two_tasks())
            .when_action(TodoAction::toggle(TaskId::new(2)))
            .then_state(|state| assert!(!state.todos[1].completed))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_dispatch_rejects_unknown_kind() {
        let state = two_tasks();
        let env = create_test_env();
        let result = TodoReducer::new().dispatch(&state, ActionRecord::new("bogus"), &env);

        assert!(matches!(result, Err(TodoError::UnrecognizedAction(ref kind)) if kind == "bogus"));
        assert_eq!(state, two_tasks());
    }

    #[test]
    fn test_dispatch_added_todo_on_empty_state() {
        let state = TodoState {
            draft: "x".to_string(),
            todos: Vec::new(),
        };
        let (next, effects) = TodoReducer::new()
            .dispatch(&state, ActionRecord::new(kind::ADDED_TODO), &create_test_env())
            .unwrap();

        assert_eq!(next.draft, "");
        assert_eq!(next.count(), 1);
        assert_eq!(next.todos[0].text, "x");
        assert!(!next.todos[0].completed);
        assert_eq!(effects.len(), 1);
        // The input state is left as it was
        assert_eq!(state.draft, "x");
    }

    #[test]
    fn test_persist_effect_writes_snapshot() {
        let storage = MemoryStorage::default();
        let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(storage.clone()));
        let (next, effects) = TodoReducer::new()
            .dispatch(&two_tasks(), ActionRecord::new(kind::REMOVED_TODO).with_id(1), &env)
            .unwrap();

        assert_eq!(storage.save_count(), 0, "reducer must not perform I/O itself");
        for effect in effects {
            effect.execute();
        }
        assert_eq!(storage.load().unwrap(), Some(next.todos));
    }

    fn arb_state() -> impl Strategy<Value = TodoState> {
        (
            ".{0,8}",
            prop::collection::btree_map(0_i64..50, (".{0,8}", any::<bool>()), 0..8),
        )
            .prop_map(|(draft, tasks)| TodoState {
                draft,
                todos: tasks
                    .into_iter()
                    .map(|(id, (text, completed))| task(id, &text, completed))
                    .collect(),
            })
    }

    proptest! {
        #[test]
        fn prop_unknown_id_is_noop(state in arb_state(), id in 50_i64..100, which in 0_usize..3) {
            let id = TaskId::new(id);
            let action = match which {
                0 => TodoAction::remove(id),
                1 => TodoAction::toggle(id),
                _ => TodoAction::edit(id, "new text"),
            };
            let mut next = state.clone();
            let effects = TodoReducer::new().reduce(&mut next, action, &create_test_env());
            prop_assert_eq!(next, state);
            prop_assert!(effects.is_empty());
        }

        #[test]
        fn prop_double_toggle_restores_state(
            state in arb_state(),
            pick in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!state.todos.is_empty());
            let id = state.todos[pick.index(state.todos.len())].id;
            let env = create_test_env();
            let mut next = state.clone();
            let _ = TodoReducer::new().reduce(&mut next, TodoAction::toggle(id), &env);
            prop_assert_ne!(&next, &state);
            let _ = TodoReducer::new().reduce(&mut next, TodoAction::toggle(id), &env);
            prop_assert_eq!(next, state);
        }

        #[test]
        fn prop_added_ids_pairwise_distinct(
            state in arb_state(),
            texts in prop::collection::vec("[a-z]{1,6}", 1..10),
        ) {
            let env = create_test_env();
            let mut next = state;
            for text in texts {
                let _ = TodoReducer::new().reduce(&mut next, TodoAction::changed_draft(text), &env);
                let _ = TodoReducer::new().reduce(&mut next, TodoAction::AddedTodo, &env);
            }
            let mut ids: Vec<_> = next.ids().collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }
}
