//! # Task List Runtime
//!
//! The Store runtime that coordinates reducer execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: owns state, reducer and environment
//! - **Command queue**: callers `send` one action at a time; each send
//!   reduces the action and runs its effects before returning
//! - **Effect executor**: runs effect descriptions in the order the reducer
//!   produced them
//!
//! The runtime is single-threaded: one gesture produces one `send`, which
//! returns only after the reducer and every effect it triggered have
//! finished. There are no suspension points.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! store.send(Action::DoSomething);
//!
//! let value = store.state(|s| s.some_field.clone());
//! ```

use tasklist_core::reducer::Reducer;

/// Store module - the runtime coordinator for a reducer
pub mod store {
    use super::Reducer;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (the single owner; readers go through [`Store::state`])
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        processed: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                processed: 0,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Calls the reducer with the current state
        /// 2. Executes returned effects in order
        ///
        /// Returns once every effect has run, so the next `send` always sees
        /// the state and side effects of this one.
        ///
        /// # Panics
        ///
        /// If the reducer or an effect panics, the panic propagates to the
        /// caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) {
            let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
            self.processed += 1;
            metrics::counter!("store.actions.processed").increment(1);
            tracing::trace!(effects = effects.len(), "Reducer returned");

            for effect in effects {
                if !effect.is_none() {
                    metrics::counter!("store.effects.executed").increment(1);
                }
                effect.execute();
            }
        }

        /// Number of actions reduced since the store was created
        #[must_use]
        pub const fn processed(&self) -> u64 {
            self.processed
        }

        /// Read state through a projection closure
        ///
        /// # Example
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// let snapshot = store.state(Clone::clone);
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Access the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store, returning the final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

pub use store::Store;
