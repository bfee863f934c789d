//! Storage key layout
//!
//! Keys look like `tsqa.WI.gw_lev_01.06.20250102_030405.full.rdb.gz`.

use chrono::{DateTime, Utc};

/// Default key prefix
pub const DEFAULT_KEY_PREFIX: &str = "ts";

/// Default dataset version segment
pub const DEFAULT_DATASET_VERSION: &str = "gw_lev_01.06";

const KEY_SUFFIX: &str = "full.rdb.gz";

/// Maps a deployment tier onto the short code used in keys
pub fn tier_code(tier: &str) -> &'static str {
    if tier == "QA" {
        "qa"
    } else if tier.to_ascii_lowercase().starts_with("prod") {
        "pr"
    } else {
        "test"
    }
}

/// Builds storage keys for one deployment tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeyFormat {
    prefix: String,
    tier_code: &'static str,
    dataset_version: String,
}

impl StorageKeyFormat {
    /// Creates a key format for `tier`
    pub fn new(
        prefix: impl Into<String>,
        tier: &str,
        dataset_version: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            tier_code: tier_code(tier),
            dataset_version: dataset_version.into(),
        }
    }

    /// Key format with the default prefix and dataset version
    pub fn for_tier(tier: &str) -> Self {
        Self::new(DEFAULT_KEY_PREFIX, tier, DEFAULT_DATASET_VERSION)
    }

    /// Short tier code embedded in every key
    pub fn tier_code(&self) -> &'static str {
        self.tier_code
    }

    /// Key for `suffix`, stamped with the current UTC time
    pub fn key(&self, suffix: &str) -> String {
        self.key_at(suffix, Utc::now())
    }

    /// Key for `suffix` stamped with `at`
    pub fn key_at(&self, suffix: &str, at: DateTime<Utc>) -> String {
        format!(
            "{}{}.{}.{}.{}.{}",
            self.prefix,
            self.tier_code,
            suffix.to_uppercase(),
            self.dataset_version,
            at.format("%Y%m%d_%H%M%S"),
            KEY_SUFFIX
        )
    }
}
