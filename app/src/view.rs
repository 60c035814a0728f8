//! Presentation: turning state into text and gestures into actions.
//!
//! Nothing here mutates state. The only rule that lives on this side is the
//! empty-draft guard on Add.

use crate::types::{TaskId, TodoAction, TodoState};
use std::fmt::Write as _;

/// A user interaction with the list widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Text typed into the draft input
    Typed(String),
    /// Add button pressed
    AddClicked,
    /// Checkbox of a row clicked
    Toggled(TaskId),
    /// Edit button of a row pressed: move the text back into the draft
    EditClicked(TaskId),
    /// Row text replaced in place
    Renamed(TaskId, String),
    /// Delete button of a row pressed
    DeleteClicked(TaskId),
}

/// Actions to dispatch, in order, for a gesture
///
/// `AddClicked` with a blank draft yields nothing. `EditClicked` copies the
/// task's text into the draft and removes the task; re-adding it gives it a
/// new id at the top of the list.
#[must_use]
pub fn actions_for(state: &TodoState, gesture: Gesture) -> Vec<TodoAction> {
    match gesture {
        Gesture::Typed(text) => vec![TodoAction::changed_draft(text)],
        Gesture::AddClicked => {
            if state.draft.trim().is_empty() {
                Vec::new()
            } else {
                vec![TodoAction::AddedTodo]
            }
        },
        Gesture::Toggled(id) => vec![TodoAction::toggle(id)],
        Gesture::EditClicked(id) => state.get(id).map_or_else(Vec::new, |task| {
            vec![TodoAction::changed_draft(task.text.clone()), TodoAction::remove(id)]
        }),
        Gesture::Renamed(id, text) => vec![TodoAction::edit(id, text)],
        Gesture::DeleteClicked(id) => vec![TodoAction::remove(id)],
    }
}

/// How completed rows are struck through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// ANSI SGR 9 (crossed out), dimmed
    #[default]
    Ansi,
    /// `~~text~~`, for terminals without SGR support and for logs
    Plain,
}

const STRIKE_ON: &str = "\u{1b}[9;2m";
const STRIKE_OFF: &str = "\u{1b}[0m";

/// Render the widget as text
///
/// ```
/// use todo::{RenderStyle, Task, TaskId, TodoState, render};
///
/// let mut state = TodoState::with_todos(vec![Task::new(TaskId::new(7), "Buy milk".into())]);
/// state.draft = "Walk".into();
/// let out = render(&state, "Home", RenderStyle::Plain);
/// assert!(out.contains("Home My Todo List"));
/// assert!(out.contains("> Walk"));
/// assert!(out.contains("[ ] Buy milk  #7"));
/// ```
#[must_use]
pub fn render(state: &TodoState, title: &str, style: RenderStyle) -> String {
    let mut out = String::new();
    let heading = format!("{title} My Todo List");
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "=".repeat(heading.chars().count()));
    let _ = writeln!(out, "> {}", state.draft);
    let _ = writeln!(out);

    if state.todos.is_empty() {
        let _ = writeln!(out, "  (nothing to do)");
    }

    for task in &state.todos {
        let mark = if task.completed { 'x' } else { ' ' };
        let text = match (task.completed, style) {
            (false, _) => task.text.clone(),
            (true, RenderStyle::Ansi) => format!("{STRIKE_ON}{}{STRIKE_OFF}", task.text),
            (true, RenderStyle::Plain) => format!("~~{}~~", task.text),
        };
        let _ = writeln!(out, "  [{mark}] {text}  #{}", task.id);
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}/{} done", state.completed_count(), state.count());
    out
}
