use crate::code::{CodeMinter, CodeScheme};
use crate::config::InventorySpec;
use crate::error::{ConfigError, LockerError, Result};
use crate::infrastructure::LockerStore;
use crate::types::{LockerId, PoolStatus, SizeClass, Ticket};
use std::collections::{HashMap, VecDeque};

/// All locker state, held in process memory.
///
/// Every locker id is either queued in exactly one pool or referenced by
/// exactly one ticket; no method leaves it in both places or neither.
#[derive(Debug)]
pub struct InMemoryLockerStore {
    small: VecDeque<LockerId>,
    medium: VecDeque<LockerId>,
    large: VecDeque<LockerId>,
    // Retrieval code -> Ticket
    tickets: HashMap<String, Ticket>,
    minter: CodeMinter,
}

impl InMemoryLockerStore {
    pub fn new(inventory: &InventorySpec, scheme: CodeScheme) -> std::result::Result<Self, ConfigError> {
        let mut store = Self {
            small: VecDeque::new(),
            medium: VecDeque::new(),
            large: VecDeque::new(),
            tickets: HashMap::new(),
            minter: CodeMinter::new(scheme),
        };
        for locker in inventory.lockers()? {
            store.release_locker(locker);
        }
        Ok(store)
    }

    fn pool(&self, size: SizeClass) -> &VecDeque<LockerId> {
        match size {
            SizeClass::Small => &self.small,
            SizeClass::Medium => &self.medium,
            SizeClass::Large => &self.large,
        }
    }

    fn pool_mut(&mut self, size: SizeClass) -> &mut VecDeque<LockerId> {
        match size {
            SizeClass::Small => &mut self.small,
            SizeClass::Medium => &mut self.medium,
            SizeClass::Large => &mut self.large,
        }
    }

    /// Best fit, then larger: the head of the first non-empty pool
    fn take_best_fit(&mut self, size: SizeClass) -> Option<LockerId> {
        size.fallback_chain()
            .find_map(|candidate| self.pool_mut(candidate).pop_front())
    }

    fn release_locker(&mut self, locker: LockerId) {
        self.pool_mut(locker.size_class()).push_back(locker);
    }
}

impl LockerStore for InMemoryLockerStore {
    fn allocate(&mut self, size: SizeClass, now: u64) -> Result<Ticket> {
        let locker = self
            .take_best_fit(size)
            .ok_or(LockerError::NoCapacity(size))?;

        let tickets = &self.tickets;
        let code = self.minter.mint(&locker, now, |c| tickets.contains_key(c));

        let ticket = Ticket::new(locker, code.clone(), now);
        self.tickets.insert(code, ticket.clone());
        Ok(ticket)
    }

    fn redeem(&mut self, code: &str) -> Result<Ticket> {
        let ticket = self
            .tickets
            .remove(code)
            .ok_or_else(|| LockerError::InvalidCode(code.to_string()))?;

        self.release_locker(ticket.locker_id.clone());
        Ok(ticket)
    }

    fn reclaim_expired(&mut self, now: u64, retention_ms: u64) -> Vec<Ticket> {
        let mut expired: Vec<(u64, String)> = self
            .tickets
            .values()
            .filter(|t| t.is_expired(now, retention_ms))
            .map(|t| (t.created_at, t.code.clone()))
            .collect();
        // Oldest first, so pools are refilled in a stable order
        expired.sort_unstable();

        let mut reclaimed = Vec::with_capacity(expired.len());
        for (_, code) in expired {
            if let Some(ticket) = self.tickets.remove(&code) {
                self.release_locker(ticket.locker_id.clone());
                reclaimed.push(ticket);
            }
        }
        reclaimed
    }

    fn status(&self) -> PoolStatus {
        PoolStatus {
            free_small: self.small.len(),
            free_medium: self.medium.len(),
            free_large: self.large.len(),
            active_tickets: self.tickets.len(),
        }
    }

    fn active_tickets(&self) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self.tickets.values().cloned().collect();
        tickets.sort_by(|a, b| (a.created_at, &a.code).cmp(&(b.created_at, &b.code)));
        tickets
    }

    fn free_lockers(&self, size: SizeClass) -> Vec<LockerId> {
        self.pool(size).iter().cloned().collect()
    }
}
