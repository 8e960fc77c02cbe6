use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use crate::types::LockerId;

/// Uppercase alphanumerics without the look-alikes 0/O and 1/I
const CODE_ALPHABET: [char; 32] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T',
    'U', 'V', 'W', 'X', 'Y', 'Z', '2', '3', '4', '5', '6', '7', '8', '9',
];

const SUFFIX_LEN: usize = 8;

/// How the trailing component of a retrieval code is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeScheme {
    /// Random nanoid suffix
    #[default]
    Random,
    /// Monotonic per-store counter
    Sequential,
}

/// Mints retrieval codes of the form `<locker>-<instant mod 10000>-<suffix>`.
///
/// The locker/instant prefix keeps codes readable at the counter; the suffix
/// is what keeps two deposits in the same clock tick apart.
#[derive(Debug, Clone)]
pub struct CodeMinter {
    scheme: CodeScheme,
    counter: u64,
}

impl CodeMinter {
    pub fn new(scheme: CodeScheme) -> Self {
        Self { scheme, counter: 0 }
    }

    pub fn scheme(&self) -> CodeScheme {
        self.scheme
    }

    /// Mint a code that `is_taken` rejects for no currently active ticket.
    pub fn mint(&mut self, locker: &LockerId, now: u64, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let suffix = match self.scheme {
                CodeScheme::Random => nanoid!(SUFFIX_LEN, &CODE_ALPHABET),
                CodeScheme::Sequential => {
                    self.counter += 1;
                    format!("{:06}", self.counter)
                }
            };
            let code = format!("{}-{:04}-{}", locker, now % 10_000, suffix);
            if !is_taken(&code) {
                return code;
            }
        }
    }
}
