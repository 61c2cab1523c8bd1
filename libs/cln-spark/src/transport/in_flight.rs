use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll, Waker};

type CallTable<Key, Outcome> = HashMap<Key, Arc<Mutex<CallState<Outcome>>>>;

/// Keeps track of calls that are in flight.
///
/// A caller registers a `Key` before issuing a call. The first caller
/// to register a key becomes the leader and must eventually [`settle`]
/// the key. Every caller that registers the same key before that happens
/// becomes a follower and shares the leader's outcome.
///
/// Settling a key removes it from the table. A call that is registered
/// afterwards will be issued again.
///
/// [`settle`]: InFlightCalls::settle
pub struct InFlightCalls<Key, Outcome> {
    calls: Arc<Mutex<CallTable<Key, Outcome>>>,
}

// Manual impl. A derive would require `Key : Clone` and `Outcome : Clone`
impl<Key, Outcome> Clone for InFlightCalls<Key, Outcome> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<Key, Outcome> Default for InFlightCalls<Key, Outcome> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Key, Outcome> InFlightCalls<Key, Outcome> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn table(&self) -> MutexGuard<'_, CallTable<Key, Outcome>> {
        // The table stays consistent even if a holder panicked
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The number of calls that are in flight
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

/// The result of [`InFlightCalls::register`]
pub enum Registration<Outcome> {
    /// No identical call was in flight. The caller must issue the call
    Leader(PendingCall<Outcome>),
    /// An identical call was in flight already
    Follower(PendingCall<Outcome>),
}

impl<Outcome> Registration<Outcome> {
    pub fn is_leader(&self) -> bool {
        matches!(self, Self::Leader(_))
    }

    pub fn into_pending(self) -> PendingCall<Outcome> {
        match self {
            Self::Leader(pending) | Self::Follower(pending) => pending,
        }
    }
}

impl<Key, Outcome> InFlightCalls<Key, Outcome>
where
    Key: Hash + Eq,
    Outcome: Clone,
{
    /// Registers interest in the call identified by `key`.
    ///
    /// The check and the insert happen under a single lock. Two callers
    /// racing for the same key can never both become the leader.
    pub fn register(&self, key: Key) -> Registration<Outcome> {
        let mut calls = self.table();

        if let Some(state) = calls.get(&key) {
            return Registration::Follower(PendingCall {
                state: state.clone(),
            });
        }

        let state = Arc::new(Mutex::new(CallState::new()));
        calls.insert(key, state.clone());
        Registration::Leader(PendingCall { state })
    }

    /// Stores the outcome of the call and wakes up everyone waiting for it.
    ///
    /// Returns `false` if no call was registered for `key`.
    pub fn settle(&self, key: &Key, outcome: Outcome) -> bool {
        let state = self.table().remove(key);

        match state {
            Some(state) => {
                let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
                state.outcome = Some(outcome);
                for waker in state.wakers.drain(..) {
                    waker.wake();
                }
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.table().contains_key(key)
    }
}

/// Shared between the table and every caller waiting for the same call
struct CallState<Outcome> {
    wakers: Vec<Waker>,
    outcome: Option<Outcome>,
}

impl<Outcome> CallState<Outcome> {
    fn new() -> Self {
        Self {
            wakers: Vec::new(),
            outcome: None,
        }
    }
}

/// Resolves to the outcome of a call once it has been settled.
///
/// Dropping a `PendingCall` doesn't cancel the call. The other callers
/// still receive the outcome.
pub struct PendingCall<Outcome> {
    state: Arc<Mutex<CallState<Outcome>>>,
}

impl<Outcome> Future for PendingCall<Outcome>
where
    Outcome: Clone,
{
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        match state.outcome.as_ref() {
            Some(outcome) => Poll::Ready(outcome.clone()),
            None => {
                let waker = context.waker();
                if !state.wakers.iter().any(|w| w.will_wake(waker)) {
                    state.wakers.push(waker.clone());
                }
                Poll::Pending
            }
        }
    }
}
