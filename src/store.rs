//! The session's single shared state container.

use crate::error::{AppError, Result};
use crate::models::{Driver, Location, SelectionState};
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type Listener = Arc<dyn Fn(&SelectionState) + Send + Sync>;

/// Handle returned by [`SelectionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Holds the current [`SelectionState`]. Every mutation replaces one field
/// under the write lock, then notifies subscribers with the new state once
/// the lock is released, so listeners may read the store themselves.
#[derive(Default)]
pub struct SelectionStore {
    state: RwLock<Arc<SelectionState>>,
    subscribers: Mutex<Subscribers>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<SelectionState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SelectionState) + Send + Sync + 'static,
    {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.next_id += 1;
        let id = subscribers.next_id;
        subscribers.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.listeners.len();
        subscribers.listeners.retain(|(id, _)| *id != subscription.0);
        subscribers.listeners.len() != before
    }

    pub fn set_user_location(&self, location: Option<Location>) -> Arc<SelectionState> {
        tracing::debug!(present = location.is_some(), "User location updated");
        self.update(|state| state.user_location = location)
    }

    pub fn set_destination_location(&self, location: Option<Location>) -> Arc<SelectionState> {
        tracing::debug!(present = location.is_some(), "Destination location updated");
        self.update(|state| state.destination_location = location)
    }

    pub fn set_drivers(&self, drivers: Vec<Driver>) -> Arc<SelectionState> {
        tracing::debug!(count = drivers.len(), "Driver roster replaced");
        self.update(|state| state.drivers = drivers)
    }

    pub fn select_driver(&self, driver_id: Option<i64>) -> Arc<SelectionState> {
        tracing::debug!(?driver_id, "Driver selection changed");
        self.update(|state| state.selected_driver_id = driver_id)
    }

    /// Like [`select_driver`](Self::select_driver), but rejects an id that is
    /// not in the roster. The check and the write share one critical section,
    /// so a concurrent roster replacement cannot slip in between.
    pub fn select_roster_driver(&self, driver_id: Option<i64>) -> Result<Arc<SelectionState>> {
        tracing::debug!(?driver_id, "Driver selection changed");
        self.swap(|state| {
            if let Some(id) = driver_id {
                if !state.drivers.iter().any(|d| d.driver_id == id) {
                    return Err(AppError::Validation(format!(
                        "Driver {} is not in the current roster",
                        id
                    )));
                }
            }
            state.selected_driver_id = driver_id;
            Ok(())
        })
    }

    /// Back to the empty session, on sign-out or when a ride completes.
    pub fn reset(&self) -> Arc<SelectionState> {
        tracing::info!("Selection state reset");
        self.update(|state| *state = SelectionState::default())
    }

    fn update<F>(&self, mutate: F) -> Arc<SelectionState>
    where
        F: FnOnce(&mut SelectionState),
    {
        let applied = self.swap(|state| {
            mutate(state);
            Ok::<_, Infallible>(())
        });
        match applied {
            Ok(next) => next,
            Err(never) => match never {},
        }
    }

    /// Apply `mutate` to a copy under the write lock and publish it. Nothing
    /// is published or announced when `mutate` fails.
    fn swap<F, E>(&self, mutate: F) -> std::result::Result<Arc<SelectionState>, E>
    where
        F: FnOnce(&mut SelectionState) -> std::result::Result<(), E>,
    {
        let next = {
            let mut current = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let mut next = (**current).clone();
            mutate(&mut next)?;
            let next = Arc::new(next);
            *current = next.clone();
            next
        };
        self.notify(&next);
        Ok(next)
    }

    fn notify(&self, state: &SelectionState) {
        let listeners: Vec<Listener> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(state);
        }
    }
}
