use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Declared error guarantee of a sketch run, always a finite value in (0, 1).
///
/// Ordered, compared and hashed by value so it can key `BTreeMap`/`HashMap`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Epsilon(f64);

impl Epsilon {
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Absolute rank error allowed over a stream of `n` elements (εn).
    #[inline]
    pub fn absolute_bound(self, n: u64) -> f64 {
        self.0 * n as f64
    }
}

impl PartialEq for Epsilon {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Epsilon {}

impl PartialOrd for Epsilon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Epsilon {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Epsilon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Epsilon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Epsilon {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("epsilon must be in (0, 1), got {value}"))
    }
}

impl From<Epsilon> for f64 {
    fn from(eps: Epsilon) -> Self {
        eps.0
    }
}
