//! Domain identifier types with validation
//!
//! Newtype wrappers keep region group keys and region codes from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region group identifier newtype wrapper
///
/// A region group is a named collection of one or more regions that share an
/// export run and an output file, e.g. `"Wisconsin"` or `"New England"`.
///
/// # Examples
///
/// ```
/// use gw_rdb::domain::ids::RegionGroupId;
/// use std::str::FromStr;
///
/// let group = RegionGroupId::from_str("Wisconsin").unwrap();
/// assert_eq!(group.as_str(), "Wisconsin");
/// assert!(!group.is_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionGroupId(String);

impl RegionGroupId {
    /// Sentinel group key requesting an export of every region group
    pub const ALL: &'static str = "ALL";

    /// Creates a new RegionGroupId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The region group key
    ///
    /// # Returns
    ///
    /// Returns `Ok(RegionGroupId)` if the key is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Region group ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns true when this is the fan-out sentinel
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Returns the region group key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RegionGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegionGroupId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RegionGroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Region code newtype wrapper
///
/// A single region (typically a state name) passed to the data source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Creates a new RegionCode from a string
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Region code cannot be empty".to_string());
        }
        Ok(Self(code))
    }

    /// Returns the region code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders a region list the way notifications show it: `[A, B]`
pub fn format_region_list(regions: &[RegionCode]) -> String {
    let names: Vec<&str> = regions.iter().map(RegionCode::as_str).collect();
    format!("[{}]", names.join(", "))
}
