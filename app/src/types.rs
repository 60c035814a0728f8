//! Domain types for the task list.
//!
//! A task list is an ordered sequence of tasks, newest first, plus the draft
//! text the user is typing. Actions come in two shapes: the untyped
//! [`ActionRecord`] that crosses process boundaries, and the typed
//! [`TodoAction`] the reducer matches on.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};

/// Unique identifier for a task within the current list
///
/// Serialized as a bare integer so persisted lists stay `{id, text, completed}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// What needs doing
    pub text: String,
    /// Whether the task is done; absent in a stored record means not done
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an open task
    #[must_use]
    pub const fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }

    /// Same task with `completed` flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Same task with new text
    #[must_use]
    pub fn with_text(&self, text: String) -> Self {
        Self {
            text,
            ..self.clone()
        }
    }
}

/// State of the task list
///
/// `todos` is ordered newest first. Ids are unique within `todos`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Text typed but not yet added
    pub draft: String,
    /// All tasks, newest first
    pub todos: Vec<Task>,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            draft: String::new(),
            todos: Vec::new(),
        }
    }

    /// Creates a state seeded with previously persisted tasks
    #[must_use]
    pub const fn with_todos(todos: Vec<Task>) -> Self {
        Self {
            draft: String::new(),
            todos,
        }
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns the number of open tasks
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in list order
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.todos.iter().map(|t| t.id)
    }
}

/// Wire names of the recognized action kinds
pub mod kind {
    /// Replace the draft text
    pub const CHANGED_DRAFT: &str = "changed_draft";
    /// Turn the draft into a task
    pub const ADDED_TODO: &str = "added_todo";
    /// Delete a task
    pub const REMOVED_TODO: &str = "removed_todo";
    /// Flip a task's completed flag
    pub const TOGGLE_TODO: &str = "toggle_todo";
    /// Replace a task's text
    pub const EDIT_TODO: &str = "edit_todo";
}

/// Untyped action as dispatched by a front end
///
/// ```
/// use todo::ActionRecord;
///
/// let record: ActionRecord = serde_json::from_str(r#"{"type":"toggle_todo","id":7}"#).unwrap();
/// assert_eq!(record.kind, "toggle_todo");
/// assert_eq!(record.id, Some(7));
/// assert_eq!(record.next_draft, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Action kind, e.g. `"added_todo"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload for `changed_draft` and `edit_todo`
    #[serde(rename = "nextDraft", default, skip_serializing_if = "Option::is_none")]
    pub next_draft: Option<String>,
    /// Target task for `removed_todo`, `toggle_todo` and `edit_todo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl ActionRecord {
    /// Record with only a kind
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set the `id` field
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the `nextDraft` field
    #[must_use]
    pub fn with_next_draft(mut self, next_draft: impl Into<String>) -> Self {
        self.next_draft = Some(next_draft.into());
        self
    }
}

/// Actions the task list reducer understands
///
/// Fields stay optional: a targeted action missing its target is a no-op,
/// not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Replace the draft (`None` clears it)
    ChangedDraft {
        /// New draft text
        next_draft: Option<String>,
    },

    /// Prepend a task built from the draft and clear the draft
    AddedTodo,

    /// Delete a task
    RemovedTodo {
        /// Task to delete
        id: Option<TaskId>,
    },

    /// Flip a task's completed flag
    ToggleTodo {
        /// Task to toggle
        id: Option<TaskId>,
    },

    /// Replace a task's text in place
    EditTodo {
        /// Task to edit
        id: Option<TaskId>,
        /// Replacement text
        next_draft: Option<String>,
    },
}

impl TodoAction {
    /// Wire name of this action
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ChangedDraft { .. } => kind::CHANGED_DRAFT,
            Self::AddedTodo => kind::ADDED_TODO,
            Self::RemovedTodo { .. } => kind::REMOVED_TODO,
            Self::ToggleTodo { .. } => kind::TOGGLE_TODO,
            Self::EditTodo { .. } => kind::EDIT_TODO,
        }
    }

    /// `changed_draft` with text
    #[must_use]
    pub fn changed_draft(text: impl Into<String>) -> Self {
        Self::ChangedDraft {
            next_draft: Some(text.into()),
        }
    }

    /// `removed_todo` targeting `id`
    #[must_use]
    pub const fn remove(id: TaskId) -> Self {
        Self::RemovedTodo { id: Some(id) }
    }

    /// `toggle_todo` targeting `id`
    #[must_use]
    pub const fn toggle(id: TaskId) -> Self {
        Self::ToggleTodo { id: Some(id) }
    }

    /// `edit_todo` targeting `id`
    #[must_use]
    pub fn edit(id: TaskId, text: impl Into<String>) -> Self {
        Self::EditTodo {
            id: Some(id),
            next_draft: Some(text.into()),
        }
    }
}

impl TryFrom<ActionRecord> for TodoAction {
    type Error = TodoError;

    fn try_from(record: ActionRecord) -> Result<Self, Self::Error> {
        let id = record.id.map(TaskId::new);
        match record.kind.as_str() {
            kind::CHANGED_DRAFT => Ok(Self::ChangedDraft {
                next_draft: record.next_draft,
            }),
            kind::ADDED_TODO => Ok(Self::AddedTodo),
            kind::REMOVED_TODO => Ok(Self::RemovedTodo { id }),
            kind::TOGGLE_TODO => Ok(Self::ToggleTodo { id }),
            kind::EDIT_TODO => Ok(Self::EditTodo {
                id,
                next_draft: record.next_draft,
            }),
            _ => Err(TodoError::UnrecognizedAction(record.kind)),
        }
    }
}

impl From<TodoAction> for ActionRecord {
    fn from(action: TodoAction) -> Self {
        let kind = action.kind().to_string();
        let (id, next_draft) = match action {
            TodoAction::ChangedDraft { next_draft } => (None, next_draft),
            TodoAction::AddedTodo => (None, None),
            TodoAction::RemovedTodo { id } | TodoAction::ToggleTodo { id } => (id, None),
            TodoAction::EditTodo { id, next_draft } => (id, next_draft),
        };
        Self {
            kind,
            next_draft,
            id: id.map(TaskId::get),
        }
    }
}
