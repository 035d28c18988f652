use aws_config::imds::region::ImdsRegionProvider;
use aws_config::Region;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Pick the AWS region: an explicit override wins, otherwise ask the
/// instance metadata service where we are running.
pub async fn resolve_region(override_region: Option<String>) -> Result<Region> {
    match override_region.as_deref().map(str::trim) {
        Some("") => debug!("Ignoring blank region override"),
        Some(region) => {
            debug!(region = %region, "Using region override");
            return Ok(Region::new(region.to_string()));
        }
        None => {}
    }

    info!("No region given, querying instance metadata");
    ImdsRegionProvider::builder()
        .build()
        .region()
        .await
        .ok_or(Error::RegionUnavailable)
}
