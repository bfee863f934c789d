//! Region group lookup
//!
//! A region group is the unit of export. It names one or more regions whose
//! rows are written to one artifact, and carries the filename suffix used in
//! the storage key. Groups without a suffix are unresolved.

use crate::config::RegionsConfig;
use crate::domain::{RdbError, RegionCode, RegionGroupId, Result};
use std::collections::BTreeMap;

/// Resolves region groups to regions and filename suffixes
pub trait RegionResolver: Send + Sync {
    /// Regions covered by `group`, in export order
    fn to_regions(&self, group: &RegionGroupId) -> Vec<RegionCode>;

    /// Filename suffix for `group`; `None` when the group is unknown
    fn filename_suffix(&self, group: &RegionGroupId) -> Option<String>;

    /// Every group that can be exported, sorted
    fn all_group_ids(&self) -> Vec<RegionGroupId>;
}

#[derive(Debug, Clone)]
struct GroupEntry {
    regions: Vec<RegionCode>,
    suffix: String,
}

/// Resolver backed by `[[regions.groups]]` configuration entries
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRegionResolver {
    groups: BTreeMap<RegionGroupId, GroupEntry>,
}

impl ConfiguredRegionResolver {
    /// Builds the resolver from configuration
    ///
    /// A group with no regions listed covers the single region named like
    /// the group itself.
    ///
    /// # Errors
    ///
    /// Returns [`RdbError::Configuration`] for blank group ids or region codes.
    pub fn from_config(config: &RegionsConfig) -> Result<Self> {
        let mut groups = BTreeMap::new();

        for group in &config.groups {
            let id = RegionGroupId::new(group.id.clone()).map_err(RdbError::Configuration)?;

            let regions = if group.regions.is_empty() {
                vec![RegionCode::new(group.id.clone()).map_err(RdbError::Configuration)?]
            } else {
                group
                    .regions
                    .iter()
                    .map(|r| RegionCode::new(r.clone()).map_err(RdbError::Configuration))
                    .collect::<Result<Vec<_>>>()?
            };

            groups.insert(
                id,
                GroupEntry {
                    regions,
                    suffix: group.suffix.trim().to_string(),
                },
            );
        }

        Ok(Self { groups })
    }

    /// Number of configured groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl RegionResolver for ConfiguredRegionResolver {
    fn to_regions(&self, group: &RegionGroupId) -> Vec<RegionCode> {
        match self.groups.get(group) {
            Some(entry) => entry.regions.clone(),
            None => RegionCode::new(group.as_str()).into_iter().collect(),
        }
    }

    fn filename_suffix(&self, group: &RegionGroupId) -> Option<String> {
        self.groups
            .get(group)
            .map(|entry| entry.suffix.clone())
            .filter(|suffix| !suffix.is_empty())
    }

    fn all_group_ids(&self) -> Vec<RegionGroupId> {
        self.groups.keys().cloned().collect()
    }
}
