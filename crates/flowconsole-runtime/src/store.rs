//! Explicit state container shared by views, guard, router and effect runner.
//!
//! Dispatches are serialised: the reducer runs, the new snapshot is published
//! on a `watch` channel, the action itself on a `broadcast` channel, and the
//! returned effects are forwarded to the effect sink.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use flowconsole_core::persistence::ActionJournal;
use flowconsole_core::reduce;
use flowconsole_core::ConsoleAction;
use flowconsole_core::ConsoleEffect;
use flowconsole_core::ConsoleState;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio::sync::watch;

const ACTION_CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: watch::Sender<ConsoleState>,
    actions: broadcast::Sender<ConsoleAction>,
    effects: Option<mpsc::UnboundedSender<ConsoleEffect>>,
    journal: Option<Mutex<ActionJournal>>,
    dispatch_lock: Mutex<()>,
}

impl Store {
    /// Store without an effect sink; effects are only returned to the caller.
    pub fn new(initial: ConsoleState) -> Self {
        Self::with_parts(initial, None, None)
    }

    pub fn with_parts(
        initial: ConsoleState,
        effects: Option<mpsc::UnboundedSender<ConsoleEffect>>,
        journal: Option<ActionJournal>,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                state,
                actions,
                effects,
                journal: journal.map(Mutex::new),
                dispatch_lock: Mutex::new(()),
            }),
        }
    }

    /// Reduces `action` into the state and returns the effects it produced.
    ///
    /// Must not be called while a `watch::Ref` from [`Store::subscribe`] is held.
    pub fn dispatch(&self, action: impl Into<ConsoleAction>) -> Vec<ConsoleEffect> {
        let action = action.into();
        let _serial = self
            .inner
            .dispatch_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        tracing::debug!(action = action.type_name(), "dispatch");
        let mut effects = Vec::new();
        self.inner.state.send_modify(|state| {
            effects = reduce(state, action.clone());
        });

        if let Some(journal) = &self.inner.journal {
            let mut journal = journal.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(err) = journal.append(&action) {
                tracing::warn!(
                    path = %journal.path().display(),
                    error = %err,
                    "failed to journal action"
                );
            }
        }

        // No subscribers is fine.
        let _ = self.inner.actions.send(action);

        if let Some(sink) = &self.inner.effects {
            for effect in &effects {
                if sink.send(effect.clone()).is_err() {
                    tracing::warn!(?effect, "effect runner is gone; dropping effect");
                }
            }
        }
        effects
    }

    pub fn subscribe(&self) -> watch::Receiver<ConsoleState> {
        self.inner.state.subscribe()
    }

    /// Live state subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.receiver_count()
    }

    /// Every action dispatched after this call, in dispatch order.
    pub fn actions(&self) -> broadcast::Receiver<ConsoleAction> {
        self.inner.actions.subscribe()
    }

    pub fn select<T>(&self, projection: impl FnOnce(&ConsoleState) -> T) -> T {
        projection(&self.inner.state.borrow())
    }

    pub fn snapshot(&self) -> ConsoleState {
        self.inner.state.borrow().clone()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("effect_sink", &self.inner.effects.is_some())
            .field("journal", &self.inner.journal.is_some())
            .finish_non_exhaustive()
    }
}
