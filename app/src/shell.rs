//! Line-oriented terminal front end.
//!
//! One command per line, each mapped to gestures (or a raw action record),
//! dispatched, then the list is re-rendered.

use crate::store::{TodoStore, dispatch_gesture, dispatch_record};
use crate::types::{ActionRecord, TaskId};
use crate::view::{Gesture, RenderStyle, render};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Help text printed by `help`
pub const HELP: &str = "\
commands:
  type <text>          replace the draft
  add [text]           add the draft (or <text>) as a task
  toggle <id>          mark done / not done
  edit <id>            move a task back into the draft
  rename <id> <text>   change a task's text in place
  delete <id>          delete a task
  raw <json>           dispatch an action record, e.g. {\"type\":\"toggle_todo\",\"id\":1}
  list                 show the list
  help                 show this text
  quit                 leave";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Gestures to replay in order
    Gestures(Vec<Gesture>),
    /// Action record to dispatch as is
    Raw(ActionRecord),
    /// Re-render only
    List,
    /// Print [`HELP`]
    Help,
    /// End the session
    Quit,
}

/// Why a line could not be parsed
#[derive(Error, Debug)]
pub enum ParseError {
    /// First word is not a command
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    /// Command needs an argument that is missing
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),

    /// Task id is not an integer
    #[error("`{0}` is not a task id")]
    InvalidId(String),

    /// `raw` payload is not an action record
    #[error("invalid action record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TaskId, ParseError> {
    let (word, _) = split_word(arg);
    if word.is_empty() {
        return Err(ParseError::MissingArgument(command, "a task id"));
    }
    word.parse().map_err(|_| ParseError::InvalidId(word.to_string()))
}

/// Parse one input line
///
/// # Errors
///
/// Returns a [`ParseError`] describing what is wrong with the line.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let (word, rest) = split_word(line.trim_end());
    let rest_text = rest.trim_end();

    match word.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "type" | "draft" => Ok(Command::Gestures(vec![Gesture::Typed(rest_text.to_string())])),
        "add" => {
            if rest_text.is_empty() {
                Ok(Command::Gestures(vec![Gesture::AddClicked]))
            } else {
                Ok(Command::Gestures(vec![
                    Gesture::Typed(rest_text.to_string()),
                    Gesture::AddClicked,
                ]))
            }
        },
        "toggle" | "done" => {
            let id = parse_id("toggle", rest)?;
            Ok(Command::Gestures(vec![Gesture::Toggled(id)]))
        },
        "edit" => {
            let id = parse_id("edit", rest)?;
            Ok(Command::Gestures(vec![Gesture::EditClicked(id)]))
        },
        "rename" => {
            let id = parse_id("rename", rest)?;
            let (_, text) = split_word(rest_text);
            if text.is_empty() {
                return Err(ParseError::MissingArgument("rename", "the new text"));
            }
            Ok(Command::Gestures(vec![Gesture::Renamed(id, text.to_string())]))
        },
        "delete" | "rm" => {
            let id = parse_id("delete", rest)?;
            Ok(Command::Gestures(vec![Gesture::DeleteClicked(id)]))
        },
        "raw" => {
            if rest_text.is_empty() {
                return Err(ParseError::MissingArgument("raw", "a JSON action record"));
            }
            Ok(Command::Raw(serde_json::from_str(rest_text)?))
        },
        _ => Err(ParseError::UnknownCommand(word.to_string())),
    }
}

/// Run a session until `quit` or end of input
///
/// Errors from parsing or dispatch are printed as `error: ...` lines and the
/// session continues.
///
/// # Errors
///
/// Returns an I/O error if reading `input` or writing `output` fails.
pub fn run<I, O>(
    store: &mut TodoStore,
    input: I,
    mut output: O,
    title: &str,
    style: RenderStyle,
) -> io::Result<()>
where
    I: BufRead,
    O: Write,
{
    writeln!(output, "{}", store.state(|s| render(s, title, style)))?;

    for line in input.lines() {
        let line = line?;
        let outcome = match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(output, "{HELP}")?;
                continue;
            },
            Ok(Command::List) => Ok(()),
            Ok(Command::Gestures(gestures)) => {
                for gesture in gestures {
                    dispatch_gesture(store, gesture);
                }
                Ok(())
            },
            Ok(Command::Raw(record)) => {
                dispatch_record(store, record).map_err(|error| error.to_string())
            },
            Err(error) => Err(error.to_string()),
        };

        if let Err(message) = outcome {
            writeln!(output, "error: {message}")?;
        }
        writeln!(output, "{}", store.state(|s| render(s, title, style)))?;
    }

    output.flush()
}
