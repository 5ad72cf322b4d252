//! Port pool value object
//!
//! A contiguous, inclusive range of external port numbers available for
//! endpoint exposure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ElkformError, ElkformResult};

/// Inclusive external port range `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPortPool")]
pub struct PortPool {
    low: u16,
    high: u16,
}

/// Unchecked wire form; bounds are validated on the way in
#[derive(Deserialize)]
struct RawPortPool {
    low: u16,
    high: u16,
}

impl TryFrom<RawPortPool> for PortPool {
    type Error = ElkformError;

    fn try_from(raw: RawPortPool) -> ElkformResult<Self> {
        PortPool::new(raw.low, raw.high)
    }
}

impl PortPool {
    /// Create a pool, rejecting inverted bounds
    pub fn new(low: u16, high: u16) -> ElkformResult<Self> {
        if low > high {
            return Err(ElkformError::InvalidPortPool { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u16 {
        self.low
    }

    pub fn high(&self) -> u16 {
        self.high
    }

    /// Ports in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.low..=self.high
    }
}

impl Default for PortPool {
    fn default() -> Self {
        Self {
            low: 31000,
            high: 31999,
        }
    }
}

impl fmt::Display for PortPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Parses `low-high`, e.g. `5000-5010`
impl FromStr for PortPool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once('-')
            .ok_or_else(|| format!("expected 'low-high', got '{}'", s))?;
        let low: u16 = low
            .trim()
            .parse()
            .map_err(|_| format!("invalid low port '{}'", low.trim()))?;
        let high: u16 = high
            .trim()
            .parse()
            .map_err(|_| format!("invalid high port '{}'", high.trim()))?;
        PortPool::new(low, high).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_inclusive() {
        let pool = PortPool::new(5000, 5010).unwrap();
        let ports: Vec<u16> = pool.iter().collect();
        assert_eq!(ports.len(), 11);
        assert_eq!(ports.first(), Some(&5000));
        assert_eq!(ports.last(), Some(&5010));
    }

    #[test]
    fn single_port_pool() {
        let pool = PortPool::new(80, 80).unwrap();
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![80]);
    }

    #[test]
    fn inverted_pool_is_rejected() {
        let err = PortPool::new(6000, 5000).unwrap_err();
        assert!(matches!(
            err,
            ElkformError::InvalidPortPool {
                low: 6000,
                high: 5000
            }
        ));
    }

    #[test]
    fn parse_from_str() {
        let pool: PortPool = "5000-5010".parse().unwrap();
        assert_eq!(pool, PortPool::new(5000, 5010).unwrap());
        assert!("5000".parse::<PortPool>().is_err());
        assert!("6000-5000".parse::<PortPool>().is_err());
        assert!("abc-5000".parse::<PortPool>().is_err());
    }

    #[test]
    fn full_u16_range() {
        let pool = PortPool::new(0, u16::MAX).unwrap();
        assert_eq!(pool.iter().count(), 65536);
    }

    #[test]
    fn deserialize_checks_bounds() {
        let pool: PortPool = serde_json::from_str(r#"{"low":5000,"high":5010}"#).unwrap();
        assert_eq!(pool, PortPool::new(5000, 5010).unwrap());

        let err = serde_json::from_str::<PortPool>(r#"{"low":40000,"high":31999}"#).unwrap_err();
        assert!(err.to_string().contains("40000"), "{}", err);
    }
}
