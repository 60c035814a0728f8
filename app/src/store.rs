//! Wiring the task list reducer into the runtime [`Store`].

use crate::environment::{TaskStorage, TodoEnvironment};
use crate::error::TodoError;
use crate::reducer::TodoReducer;
use crate::storage::load_or_default;
use crate::types::{ActionRecord, TodoAction, TodoState};
use crate::view::{Gesture, actions_for};
use tasklist_runtime::Store;

/// Store specialised to the task list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Start a session: seed `todos` from the environment's storage, if any
///
/// An unreadable or malformed slot is logged and the session starts empty.
#[must_use]
pub fn open_store(env: TodoEnvironment) -> TodoStore {
    let todos = match &env.storage {
        Some(storage) => load_or_default(storage.as_ref()),
        None => Vec::new(),
    };
    Store::new(TodoState::with_todos(todos), TodoReducer::new(), env)
}

/// Start a session, refusing to continue past a bad slot
///
/// # Errors
///
/// Returns [`TodoError::Storage`] when the slot exists but cannot be read or
/// decoded. Nothing is written in that case, so the slot is left as found.
pub fn try_open_store(env: TodoEnvironment) -> Result<TodoStore, TodoError> {
    let todos = match &env.storage {
        Some(storage) => storage.load()?.unwrap_or_default(),
        None => Vec::new(),
    };
    tracing::info!(count = todos.len(), "Task list loaded");
    Ok(Store::new(TodoState::with_todos(todos), TodoReducer::new(), env))
}

/// Dispatch an untyped action record
///
/// # Errors
///
/// Returns [`TodoError::UnrecognizedAction`] for an unknown kind, in which
/// case the store is not touched.
pub fn dispatch_record(store: &mut TodoStore, record: ActionRecord) -> Result<(), TodoError> {
    let action = TodoAction::try_from(record).inspect_err(|error| {
        tracing::error!(%error, "Rejected action");
    })?;
    store.send(action);
    Ok(())
}

/// Translate a gesture against current state and dispatch the result
///
/// Returns the number of actions dispatched.
pub fn dispatch_gesture(store: &mut TodoStore, gesture: Gesture) -> usize {
    let actions = store.state(|state| actions_for(state, gesture));
    let dispatched = actions.len();
    for action in actions {
        store.send(action);
    }
    dispatched
}
