//! Navigator
//!
//! Tracks the current location and a bounded back-stack. Each navigation
//! bumps a generation counter, which is what [`Visit`] tokens compare
//! against.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

use crate::location::Location;
use crate::Result;

const MAX_BACK_STACK: usize = 20;

struct NavState {
    current: Location,
    back: Vec<Location>,
    generation: u64,
}

#[derive(Clone)]
pub struct Navigator {
    state: Arc<RwLock<NavState>>,
}

impl Navigator {
    pub fn new(initial: Location) -> Self {
        Self {
            state: Arc::new(RwLock::new(NavState {
                current: initial,
                back: Vec::new(),
                generation: 0,
            })),
        }
    }

    pub fn current(&self) -> Location {
        self.state.read().current
    }

    pub fn on_login_surface(&self) -> bool {
        self.state.read().current.is_login_surface()
    }

    /// Move to `location`. Navigating to where we already are keeps the
    /// current visit alive.
    pub fn navigate(&self, location: Location) -> Visit {
        let mut state = self.state.write();

        if state.current != location {
            let previous = std::mem::replace(&mut state.current, location);
            state.back.push(previous);
            if state.back.len() > MAX_BACK_STACK {
                let overflow = state.back.len() - MAX_BACK_STACK;
                state.back.drain(0..overflow);
            }
            state.generation += 1;

            tracing::debug!(from = %previous, to = %location, "Navigated");
        }

        self.visit_locked(&state)
    }

    pub fn navigate_path(&self, path: &str) -> Result<Visit> {
        Ok(self.navigate(Location::parse(path)?))
    }

    /// Return to the previous location, if any
    pub fn back(&self) -> Option<Visit> {
        let mut state = self.state.write();
        let previous = state.back.pop()?;
        state.current = previous;
        state.generation += 1;
        Some(self.visit_locked(&state))
    }

    /// Token for the current visit
    pub fn visit(&self) -> Visit {
        self.visit_locked(&self.state.read())
    }

    /// Back-stack, oldest first
    pub fn history(&self) -> Vec<Location> {
        self.state.read().back.clone()
    }

    fn visit_locked(&self, state: &NavState) -> Visit {
        Visit {
            location: state.current,
            generation: state.generation,
            state: Arc::downgrade(&self.state),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

/// One stay at a location
#[derive(Clone)]
pub struct Visit {
    location: Location,
    generation: u64,
    state: Weak<RwLock<NavState>>,
}

impl Visit {
    pub fn location(&self) -> Location {
        self.location
    }

    /// False once the user has navigated elsewhere (or the navigator is gone)
    pub fn is_current(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.read().generation == self.generation)
    }
}

impl std::fmt::Debug for Visit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visit")
            .field("location", &self.location)
            .field("generation", &self.generation)
            .finish()
    }
}
