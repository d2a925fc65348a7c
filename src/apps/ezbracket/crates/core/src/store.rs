//! The state holder: applies dispatched actions and notifies listeners.

use crate::{Action, BallotState, reducer};
use std::sync::Arc;
use tracing::debug;

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&BallotState) + Send>;

/// Holds the current snapshot.
///
/// `dispatch` takes `&mut self`, so actions are applied one at a time and
/// every listener sees each snapshot before the next action runs.
pub struct Store {
    /// Current snapshot.
    state: Arc<BallotState>,

    /// Listeners in subscription order.
    listeners: Vec<(SubscriptionId, Listener)>,

    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// A store holding the empty snapshot.
    pub fn new() -> Self {
        Self::with_state(BallotState::default())
    }

    /// A store starting from `state`.
    pub fn with_state(state: BallotState) -> Self {
        Self {
            state: Arc::new(state),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<BallotState> {
        Arc::clone(&self.state)
    }

    /// Apply `action` and notify listeners. Returns the new snapshot.
    pub fn dispatch(&mut self, action: &Action) -> Arc<BallotState> {
        let next = Arc::new(reducer::reduce(Some(self.state.as_ref()), action));
        debug!(kind = action.kind(), listeners = self.listeners.len(), "action dispatched");

        self.state = Arc::clone(&next);

        for (_, listener) in &mut self.listeners {
            listener(next.as_ref());
        }

        next
    }

    /// Register a listener called after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&BallotState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }
}
