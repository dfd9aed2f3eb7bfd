//! # Pricing Configuration
//!
//! Settings that shape how catalogs are built.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_DUPLICATE_POLICY=keep_last                                  │
//! │                                                                         │
//! │  2. TOML text supplied by the caller                                   │
//! │     (this crate never touches the file system)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     DuplicatePolicy::Reject                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration Format
//! ```toml
//! duplicate_policy = "keep_last"  # reject | keep_last
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::DuplicatePolicy;
use crate::error::ConfigResult;

/// Environment variable overriding [`PricingConfig::duplicate_policy`].
pub const ENV_DUPLICATE_POLICY: &str = "BASKET_DUPLICATE_POLICY";

/// Pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// How catalog construction resolves two entries with the same name.
    pub duplicate_policy: DuplicatePolicy,
}

impl PricingConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: PricingConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        let mut config = PricingConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Layers defaults, optional TOML text, then the environment.
    pub fn load(toml: Option<&str>) -> ConfigResult<Self> {
        Self::load_with(toml, |key| std::env::var(key).ok())
    }

    /// Layers defaults, optional TOML text, then overrides read through
    /// `lookup`.
    ///
    /// ```rust
    /// use basket_core::{DuplicatePolicy, PricingConfig};
    ///
    /// let config = PricingConfig::load_with(
    ///     Some(r#"duplicate_policy = "keep_last""#),
    ///     |_| Some("reject".to_string()),
    /// )
    /// .unwrap();
    /// assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    /// ```
    pub fn load_with<F>(toml: Option<&str>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match toml {
            Some(contents) => Self::from_toml_str(contents)?,
            None => PricingConfig::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup` (keyed by variable name).
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DUPLICATE_POLICY) {
            match value.parse::<DuplicatePolicy>() {
                Ok(policy) => {
                    debug!(policy = %policy, "Overriding duplicate policy from environment");
                    self.duplicate_policy = policy;
                }
                Err(e) => warn!("Ignoring {}: {}", ENV_DUPLICATE_POLICY, e),
            }
        }
    }
}
