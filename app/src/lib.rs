//! A single-list to-do widget built on a reducer.
//!
//! State is `{draft, todos}`. Every change goes through [`TodoReducer`] as
//! one of five actions; changes to `todos` are mirrored to a
//! [`TaskStorage`] slot by an effect the store runs after each reduce.
//!
//! - [`types`]: tasks, state, and both action shapes
//! - [`reducer`]: the state transitions
//! - [`environment`] / [`storage`]: clock and persistence gateway
//! - [`view`]: rendering and gesture translation
//! - [`store`] / [`shell`]: session wiring and the terminal front end
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tasklist_core::environment::SystemClock;
//! use todo::{Gesture, MemoryStorage, TodoEnvironment, dispatch_gesture, open_store};
//!
//! let storage = MemoryStorage::default();
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(storage.clone()));
//! let mut store = open_store(env);
//!
//! dispatch_gesture(&mut store, Gesture::Typed("Buy milk".into()));
//! dispatch_gesture(&mut store, Gesture::AddClicked);
//!
//! let state = store.state(Clone::clone);
//! assert_eq!(state.count(), 1);
//! assert_eq!(state.draft, "");
//! assert_eq!(storage.save_count(), 1);
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod shell;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use environment::{TaskStorage, TodoEnvironment};
pub use error::{StorageError, TodoError};
pub use reducer::TodoReducer;
pub use storage::{JsonFileStorage, MemoryStorage, load_or_default};
pub use store::{TodoStore, dispatch_gesture, dispatch_record, open_store, try_open_store};
pub use types::{ActionRecord, Task, TaskId, TodoAction, TodoState};
pub use view::{Gesture, RenderStyle, actions_for, render};
