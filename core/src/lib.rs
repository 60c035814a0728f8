//! # Task List Core
//!
//! Core traits and types for the task list store.
//!
//! Everything that changes application state goes through a single
//! [`Reducer`](reducer::Reducer): a function of `(State, Action, Environment)`
//! that mutates state in place and returns [`Effect`](effect::Effect)
//! descriptions. The runtime crate owns execution of those effects.
//!
//! ## Core Concepts
//!
//! - **State**: owned, `Clone`-able domain state
//! - **Action**: every input the reducer accepts
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a side effect description, not its execution
//! - **Environment**: injected dependencies (clock, storage gateway)
//!
//! ## Example
//!
//! ```
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Draft {
//!     text: String,
//! }
//!
//! enum DraftAction {
//!     Changed(String),
//! }
//!
//! struct DraftReducer;
//!
//! impl Reducer for DraftReducer {
//!     type State = Draft;
//!     type Action = DraftAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Draft,
//!         action: DraftAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect; 4]> {
//!         match action {
//!             DraftAction::Changed(text) => state.text = text,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Draft::default();
//! let effects = DraftReducer.reduce(&mut state, DraftAction::Changed("milk".into()), &());
//! assert_eq!(state.text, "milk");
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the single entry point for state transitions
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Implementations must be deterministic given the same state, action
        /// and environment. All I/O is described through the returned effects
        /// and performed by the runtime.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned from reducers. The store executes them after
/// the reducer returns, in the order they were produced.
pub mod effect {
    /// Boxed side effect
    pub type Work = Box<dyn FnOnce() + Send>;

    /// Effect type - describes a side effect to be executed
    pub enum Effect {
        /// No-op effect
        None,

        /// Synchronous side effect (storage writes, logging sinks)
        Run(Work),
    }

    // Manual Debug implementation since closures don't implement Debug
    impl std::fmt::Debug for Effect {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Run(_) => write!(f, "Effect::Run(<closure>)"),
            }
        }
    }

    impl Effect {
        /// Wrap a closure as an [`Effect::Run`]
        #[must_use]
        pub fn run<F>(work: F) -> Self
        where
            F: FnOnce() + Send + 'static,
        {
            Effect::Run(Box::new(work))
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Perform the effect
        pub fn execute(self) {
            if let Effect::Run(work) = self {
                work();
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// Dependencies are abstracted behind traits and injected through the
/// reducer's `Environment` parameter so tests can swap in fixed values.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
