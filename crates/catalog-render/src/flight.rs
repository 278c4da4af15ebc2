use crate::types::{CatalogError, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Rejects a generation while an identical one is still running.
#[derive(Debug, Clone, Default)]
pub struct FlightGate {
    active: Arc<Mutex<HashSet<String>>>,
}

/// Held for the duration of one generation; releases its key on drop.
#[derive(Debug)]
pub struct FlightGuard {
    active: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl FlightGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, key: impl Into<String>) -> Result<FlightGuard> {
        let key = key.into();
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key.clone()) {
            log::warn!("Rejected duplicate generation: {}", key);
            return Err(CatalogError::AlreadyInProgress);
        }
        Ok(FlightGuard {
            active: Arc::clone(&self.active),
            key,
        })
    }

    pub fn in_flight(&self) -> usize {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}
