//! Serving configuration.
//!
//! The per-read unit size is dictated by the transport's negotiated
//! payload, and the content cap by the serving buffer: both are
//! deployment parameters, not hardcoded constants. Defaults match the
//! observed deployment (20-byte units, 10,000-byte cap).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default per-read unit size in bytes.
pub const DEFAULT_MAX_UNIT: usize = 20;

/// Default content capacity in bytes; longer content is truncated.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Default resource handle budget (255 static chunks plus the count
/// resource).
pub const DEFAULT_HANDLE_BUDGET: usize = 256;

/// Which partitioning strategy the binder exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    /// One dynamic resource; chunks delivered in cursor order.
    #[default]
    Sequential,

    /// Pre-split chunk resources plus the one-byte count resource.
    Static,
}

/// Configuration for a serving instance.
///
/// # Examples
///
/// ```
/// use fatserve::config::ServeConfig;
///
/// let config = ServeConfig::default();
/// assert_eq!(config.max_unit, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Largest number of bytes in one read response.
    pub max_unit: usize,

    /// Content capacity in bytes; longer content is silently truncated.
    pub capacity: usize,

    /// Partitioning strategy to expose.
    pub mode: ServeMode,

    /// Number of resource handles available for registration.
    pub handle_budget: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            max_unit: DEFAULT_MAX_UNIT,
            capacity: DEFAULT_CAPACITY,
            mode: ServeMode::Sequential,
            handle_budget: DEFAULT_HANDLE_BUDGET,
        }
    }
}

impl ServeConfig {
    /// Creates a sequential-mode configuration with defaults.
    #[must_use]
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Creates a static-mode configuration with defaults.
    #[must_use]
    pub fn static_split() -> Self {
        Self {
            mode: ServeMode::Static,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero unit size or handle budget.
    pub fn validate(&self) -> Result<()> {
        if self.max_unit == 0 {
            return Err(Error::Config {
                message: "max_unit must be > 0".to_string(),
            });
        }
        if self.handle_budget == 0 {
            return Err(Error::Config {
                message: "handle_budget must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
