use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::code::CodeScheme;
use crate::error::ConfigError;
use crate::types::{LockerId, SizeClass};

/// Three days, in milliseconds
pub const DEFAULT_RETENTION_MS: u64 = 3 * 24 * 60 * 60 * 1000;

pub const DEFAULT_LOCKERS_PER_CLASS: usize = 10;

/// The fixed set of lockers seeded into a store at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventorySpec {
    /// `n` lockers per class, named `S-0..`, `M-0..`, `L-0..`
    Counts {
        #[serde(default)]
        small: usize,
        #[serde(default)]
        medium: usize,
        #[serde(default)]
        large: usize,
    },
    /// Explicit ids; the class is taken from each id's prefix
    Explicit(Vec<String>),
}

impl Default for InventorySpec {
    fn default() -> Self {
        InventorySpec::Counts {
            small: DEFAULT_LOCKERS_PER_CLASS,
            medium: DEFAULT_LOCKERS_PER_CLASS,
            large: DEFAULT_LOCKERS_PER_CLASS,
        }
    }
}

impl InventorySpec {
    /// Expands the spec into locker ids, in seeding order.
    pub fn lockers(&self) -> Result<Vec<LockerId>, ConfigError> {
        let lockers = match self {
            InventorySpec::Counts { small, medium, large } => SizeClass::ALL
                .into_iter()
                .zip([*small, *medium, *large])
                .flat_map(|(size, n)| (0..n).map(move |i| LockerId::new(size, i)))
                .collect::<Vec<_>>(),
            InventorySpec::Explicit(ids) => {
                let mut seen = HashSet::new();
                let mut lockers = Vec::with_capacity(ids.len());
                for raw in ids {
                    let id: LockerId = raw.parse()?;
                    if !seen.insert(raw.as_str()) {
                        return Err(ConfigError::DuplicateLocker(raw.clone()));
                    }
                    lockers.push(id);
                }
                lockers
            }
        };

        if lockers.is_empty() {
            return Err(ConfigError::EmptyInventory);
        }
        Ok(lockers)
    }
}

/// Engine settings. Every field has a default, so a partial JSON document
/// (or `{}`) deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub inventory: InventorySpec,
    /// Tickets strictly older than this are reclaimed by a sweep
    pub retention_ms: u64,
    pub code_scheme: CodeScheme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inventory: InventorySpec::default(),
            retention_ms: DEFAULT_RETENTION_MS,
            code_scheme: CodeScheme::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_inventory(inventory: InventorySpec) -> Self {
        Self {
            inventory,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention_ms == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        self.inventory.lockers().map(|_| ())
    }
}
