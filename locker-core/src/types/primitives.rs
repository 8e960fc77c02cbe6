use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Locker size classes, ordered smallest to largest.
/// Deposits fall back upward through this order, never downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Leading character of every locker id in this class
    pub fn prefix(self) -> char {
        match self {
            SizeClass::Small => 'S',
            SizeClass::Medium => 'M',
            SizeClass::Large => 'L',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'S' => Some(SizeClass::Small),
            'M' => Some(SizeClass::Medium),
            'L' => Some(SizeClass::Large),
            _ => None,
        }
    }

    /// The next class up, if any
    pub fn larger(self) -> Option<Self> {
        match self {
            SizeClass::Small => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Large),
            SizeClass::Large => None,
        }
    }

    /// This class followed by every larger class, in search order
    pub fn fallback_chain(self) -> impl Iterator<Item = SizeClass> {
        std::iter::successors(Some(self), |s| s.larger())
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeClass::Small => write!(f, "SMALL"),
            SizeClass::Medium => write!(f, "MEDIUM"),
            SizeClass::Large => write!(f, "LARGE"),
        }
    }
}

impl FromStr for SizeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SMALL" | "S" => Ok(SizeClass::Small),
            "MEDIUM" | "M" => Ok(SizeClass::Medium),
            "LARGE" | "L" => Ok(SizeClass::Large),
            _ => Err(format!(
                "Invalid size '{}'. Must be one of: SMALL, MEDIUM, LARGE",
                s
            )),
        }
    }
}

/// Identifier of one physical locker, e.g. "S-3" or "L-0".
///
/// The size class is parsed from the prefix once, at construction, so a
/// `LockerId` always knows which pool it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LockerId {
    size: SizeClass,
    name: String,
}

impl LockerId {
    /// Builds the canonical id for the `index`-th locker of a class
    pub fn new(size: SizeClass, index: usize) -> Self {
        Self {
            size,
            name: format!("{}-{}", size.prefix(), index),
        }
    }

    pub fn size_class(&self) -> SizeClass {
        self.size
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl FromStr for LockerId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLockerId(s.to_string());

        let mut chars = s.chars();
        let size = chars.next().and_then(SizeClass::from_prefix).ok_or_else(invalid)?;
        let label = chars.as_str().strip_prefix('-').ok_or_else(invalid)?;
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            size,
            name: s.to_string(),
        })
    }
}

impl TryFrom<String> for LockerId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LockerId> for String {
    fn from(id: LockerId) -> Self {
        id.name
    }
}

impl std::fmt::Display for LockerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
