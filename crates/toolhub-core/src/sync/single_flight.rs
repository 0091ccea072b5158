//! Generation-scoped single-flight cell
//!
//! Holds either nothing, one in-progress attempt shared by every waiter, or a
//! finished value. An attempt's outcome is only committed if the cell has not
//! been reset since the attempt started.

use std::future::Future;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::error::{RegistryError, RegistryResult};

type Flight<T> = Shared<BoxFuture<'static, RegistryResult<T>>>;

enum Slot<T> {
    Empty,
    Pending { id: u64, flight: Flight<T> },
    Ready(T),
}

struct Inner<T> {
    slot: Slot<T>,
    generation: u64,
    next_flight: u64,
    last_error: Option<RegistryError>,
}

/// Observable state of a [`SingleFlight`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Empty,
    Pending,
    Ready,
}

/// Consistent view of a [`SingleFlight`], taken under a single lock
#[derive(Debug, Clone)]
pub struct FlightSnapshot<T> {
    pub state: FlightState,
    pub generation: u64,
    pub value: Option<T>,
    pub last_error: Option<RegistryError>,
}

/// Single-flight cell: concurrent callers share one attempt and its outcome
pub struct SingleFlight<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                generation: 0,
                next_flight: 0,
                last_error: None,
            }),
        }
    }

    /// The finished value, if any
    pub fn get(&self) -> Option<T> {
        match &self.inner.lock().slot {
            Slot::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> FlightState {
        match self.inner.lock().slot {
            Slot::Empty => FlightState::Empty,
            Slot::Pending { .. } => FlightState::Pending,
            Slot::Ready(_) => FlightState::Ready,
        }
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    pub fn snapshot(&self) -> FlightSnapshot<T> {
        let inner = self.inner.lock();
        let (state, value) = match &inner.slot {
            Slot::Empty => (FlightState::Empty, None),
            Slot::Pending { .. } => (FlightState::Pending, None),
            Slot::Ready(value) => (FlightState::Ready, Some(value.clone())),
        };
        FlightSnapshot {
            state,
            generation: inner.generation,
            value,
            last_error: inner.last_error.clone(),
        }
    }

    /// Error of the most recent failed attempt in the current generation
    pub fn last_error(&self) -> Option<RegistryError> {
        self.inner.lock().last_error.clone()
    }

    /// Drop any value, orphan any in-progress attempt, and start a new
    /// generation. Returns the new generation.
    pub fn reset(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.slot = Slot::Empty;
        inner.last_error = None;
        inner.generation
    }

    /// Return the finished value, or join (or start) the current attempt.
    ///
    /// All callers joined to one attempt receive the same result. A failed
    /// attempt leaves the cell empty so the next call starts afresh. If the
    /// cell is reset while an attempt runs, its result is discarded and the
    /// caller retries under the new generation.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> RegistryResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = RegistryResult<T>> + Send + 'static,
    {
        loop {
            let (generation, id, flight) = {
                let mut guard = self.inner.lock();
                let inner = &mut *guard;
                match &inner.slot {
                    Slot::Ready(value) => return Ok(value.clone()),
                    Slot::Pending { id, flight } => (inner.generation, *id, flight.clone()),
                    Slot::Empty => {
                        let id = inner.next_flight;
                        inner.next_flight += 1;
                        let flight = init().boxed().shared();
                        inner.slot = Slot::Pending {
                            id,
                            flight: flight.clone(),
                        };
                        (inner.generation, id, flight)
                    }
                }
            };

            let result = flight.await;
            if self.commit(generation, id, &result) {
                return result;
            }
        }
    }

    /// Record an attempt's outcome. Returns `false` if the attempt is stale.
    fn commit(&self, generation: u64, id: u64, result: &RegistryResult<T>) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return false;
        }

        // Only the first waiter to arrive performs the transition
        let current = matches!(&inner.slot, Slot::Pending { id: pending, .. } if *pending == id);
        if current {
            match result {
                Ok(value) => {
                    inner.slot = Slot::Ready(value.clone());
                    inner.last_error = None;
                }
                Err(e) => {
                    inner.slot = Slot::Empty;
                    inner.last_error = Some(e.clone());
                }
            }
        }
        true
    }
}
