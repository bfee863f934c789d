//! Groups command implementation
//!
//! Lists the region groups an `ALL` export would cover.

use crate::adapters::regions::{ConfiguredRegionResolver, RegionResolver};
use crate::config::load_config;
use crate::domain::ids::format_region_list;
use clap::Args;
use serde::Serialize;

/// Arguments for the groups command
#[derive(Args, Debug)]
pub struct GroupsArgs {
    /// Print the groups as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct GroupListing {
    id: String,
    suffix: Option<String>,
    regions: Vec<String>,
}

impl GroupsArgs {
    /// Execute the groups command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let resolver = match ConfiguredRegionResolver::from_config(&config.regions) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid region groups: {e}");
                return Ok(2);
            }
        };

        let listings = list_groups(&resolver);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&listings)?);
            return Ok(0);
        }

        if listings.is_empty() {
            println!("No region groups configured");
            return Ok(0);
        }

        for listing in &listings {
            println!(
                "{:<24} {:<6} [{}]",
                listing.id,
                listing.suffix.as_deref().unwrap_or("-"),
                listing.regions.join(", ")
            );
        }
        Ok(0)
    }
}

fn list_groups(resolver: &dyn RegionResolver) -> Vec<GroupListing> {
    resolver
        .all_group_ids()
        .into_iter()
        .map(|group| {
            let regions = resolver.to_regions(&group);
            tracing::debug!(
                region_group = %group,
                regions = %format_region_list(&regions),
                "Listing group"
            );
            GroupListing {
                suffix: resolver.filename_suffix(&group),
                regions: regions.iter().map(|r| r.to_string()).collect(),
                id: group.into_inner(),
            }
        })
        .collect()
}
