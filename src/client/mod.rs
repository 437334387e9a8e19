//! Remote SiteWise API access
//!
//! The tools only need five read operations. [`SiteWiseApi`] captures them as
//! blocking calls returning one page at a time; pagination itself lives in
//! [`crate::paginate`].

pub mod aws_cli;
pub mod in_memory;

pub use aws_cli::AwsCliClient;
pub use in_memory::{ApiCall, InMemorySiteWise};

use crate::error::Result;
use crate::types::{AssetDescription, AssetModelDescription, AssetModelSummary, AssetSummary, Page};

/// Read operations against the asset-modeling service
pub trait SiteWiseApi {
    /// Describe an asset, without its properties
    fn describe_asset(&self, asset_id: &str) -> Result<AssetDescription>;

    /// One page of the child assets associated through a hierarchy
    fn list_associated_assets(
        &self,
        asset_id: &str,
        hierarchy_id: &str,
        next_token: Option<&str>,
    ) -> Result<Page<AssetSummary>>;

    /// Describe an asset model; `exclude_properties` requests the lighter payload
    fn describe_asset_model(
        &self,
        model_id: &str,
        exclude_properties: bool,
    ) -> Result<AssetModelDescription>;

    /// One page of all asset models
    fn list_asset_models(&self, next_token: Option<&str>) -> Result<Page<AssetModelSummary>>;

    /// One page of the assets created from a model
    fn list_assets(&self, model_id: &str, next_token: Option<&str>) -> Result<Page<AssetSummary>>;
}
