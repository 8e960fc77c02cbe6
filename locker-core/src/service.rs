//! The locker allocation engine: the public entry point wrapping the
//! state block, the time capability, and engine settings.
//! The CLI's HTTP server and demo both delegate to this.

use parking_lot::Mutex;

use crate::clock::TimeSource;
use crate::config::EngineConfig;
use crate::error::{ConfigError, Result};
use crate::infrastructure::LockerStore;
use crate::infrastructure_in_memory::InMemoryLockerStore;
use crate::types::*;

/// Hands out lockers, redeems retrieval codes, and sweeps stale deposits.
///
/// One mutex covers pools and tickets together. It is held for the whole of
/// each operation, including the clock read, so no caller can observe a
/// locker that has left its pool without a ticket (or the reverse).
pub struct LockerService<C, S = InMemoryLockerStore> {
    store: Mutex<S>,
    clock: C,
    retention_ms: u64,
}

impl<C: TimeSource> LockerService<C> {
    /// Create an engine over an in-memory store seeded from `config`.
    pub fn new(config: EngineConfig, clock: C) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let store = InMemoryLockerStore::new(&config.inventory, config.code_scheme)?;
        let service = Self::with_store(store, clock, config.retention_ms)?;

        let status = service.status();
        tracing::info!(
            small = status.free_small,
            medium = status.free_medium,
            large = status.free_large,
            retention_ms = config.retention_ms,
            "Locker inventory seeded"
        );
        Ok(service)
    }
}

impl<C: TimeSource, S: LockerStore> LockerService<C, S> {
    /// Wrap an already-seeded store.
    pub fn with_store(store: S, clock: C, retention_ms: u64) -> std::result::Result<Self, ConfigError> {
        if retention_ms == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        Ok(Self {
            store: Mutex::new(store),
            clock,
            retention_ms,
        })
    }

    /// Allocate a locker of `size` or the nearest larger class.
    pub fn deposit(&self, size: SizeClass) -> Result<Ticket> {
        let mut store = self.store.lock();
        let now = self.clock.now_ms();

        match store.allocate(size, now) {
            Ok(ticket) => {
                tracing::debug!(
                    requested = %size,
                    locker_id = %ticket.locker_id,
                    code = %ticket.code,
                    "Package deposited"
                );
                Ok(ticket)
            }
            Err(e) => {
                tracing::warn!(requested = %size, "No locker capacity");
                Err(e)
            }
        }
    }

    /// Open the locker behind `code` and retire its ticket.
    pub fn pickup(&self, code: &str) -> Result<Confirmation> {
        let mut store = self.store.lock();

        match store.redeem(code) {
            Ok(ticket) => {
                tracing::debug!(locker_id = %ticket.locker_id, code = %code, "Package retrieved");
                Ok(Confirmation {
                    locker_id: ticket.locker_id,
                })
            }
            Err(e) => {
                tracing::warn!(code = %code, "Pickup rejected");
                Err(e)
            }
        }
    }

    /// Reclaim every locker whose ticket has outlived the retention window.
    /// Returns the reclaimed lockers, oldest deposit first.
    pub fn sweep(&self) -> Vec<LockerId> {
        let mut store = self.store.lock();
        let now = self.clock.now_ms();

        store
            .reclaim_expired(now, self.retention_ms)
            .into_iter()
            .map(|ticket| {
                tracing::info!(
                    locker_id = %ticket.locker_id,
                    code = %ticket.code,
                    age_ms = ticket.age(now),
                    "Expired package removed"
                );
                ticket.locker_id
            })
            .collect()
    }

    pub fn status(&self) -> PoolStatus {
        self.store.lock().status()
    }

    pub fn active_tickets(&self) -> Vec<Ticket> {
        self.store.lock().active_tickets()
    }

    pub fn free_lockers(&self, size: SizeClass) -> Vec<LockerId> {
        self.store.lock().free_lockers(size)
    }

    pub fn retention_ms(&self) -> u64 {
        self.retention_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
