//! In-memory SiteWise service
//!
//! Serves a fixed set of assets and asset models with configurable page
//! sizes and records every call, so traversals can be exercised without the
//! remote service.
//!
//! # Example
//! ```
//! use sitewise_tools::client::{InMemorySiteWise, SiteWiseApi};
//! use sitewise_tools::types::AssetModelDescription;
//!
//! let mut service = InMemorySiteWise::new();
//! service.add_model(AssetModelDescription::new("m1", "Pump"));
//!
//! let page = service.list_asset_models(None).unwrap();
//! assert_eq!(page.items[0].name, "Pump");
//! assert!(page.next_token.is_none());
//! ```

use super::SiteWiseApi;
use crate::error::{Result, SiteWiseError};
use crate::types::{
    AssetDescription, AssetModelDescription, AssetModelSummary, AssetSummary, Page,
};
use hashbrown::HashMap;
use std::cell::RefCell;

/// A call received by [`InMemorySiteWise`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    DescribeAsset(String),
    ListAssociatedAssets {
        asset_id: String,
        hierarchy_id: String,
    },
    DescribeAssetModel {
        model_id: String,
        exclude_properties: bool,
    },
    ListAssetModels,
    ListAssets(String),
}

/// Fixture-backed implementation of [`SiteWiseApi`]
#[derive(Debug, Default)]
pub struct InMemorySiteWise {
    assets: HashMap<String, AssetDescription>,
    /// (parent asset, hierarchy) -> child assets
    associations: HashMap<(String, String), Vec<AssetSummary>>,
    /// Models in listing order
    models: Vec<AssetModelDescription>,
    /// Model id -> assets created from it
    model_assets: HashMap<String, Vec<AssetSummary>>,
    page_size: Option<usize>,
    calls: RefCell<Vec<ApiCall>>,
}

impl InMemorySiteWise {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split listings into pages of `page_size` items
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn add_asset(&mut self, asset: AssetDescription) {
        self.assets.insert(asset.asset_id.clone(), asset);
    }

    /// Associate `child` with `parent_id` through `hierarchy_id`
    pub fn associate(&mut self, parent_id: &str, hierarchy_id: &str, child: AssetSummary) {
        self.associations
            .entry((parent_id.to_string(), hierarchy_id.to_string()))
            .or_default()
            .push(child);
    }

    pub fn add_model(&mut self, model: AssetModelDescription) {
        self.models.push(model);
    }

    /// Register an asset created from `model_id`
    pub fn add_model_asset(&mut self, model_id: &str, asset: AssetSummary) {
        self.model_assets
            .entry(model_id.to_string())
            .or_default()
            .push(asset);
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count_calls(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }

    fn page<T: Clone>(
        &self,
        operation: &str,
        items: &[T],
        next_token: Option<&str>,
    ) -> Result<Page<T>> {
        let offset = match next_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                SiteWiseError::api(
                    operation,
                    format!("InvalidRequestException: bad token '{}'", token),
                )
            })?,
            None => 0,
        };
        let size = self.page_size.unwrap_or(usize::MAX);
        let end = offset.saturating_add(size).min(items.len());
        let slice = items.get(offset..end).unwrap_or(&[]).to_vec();
        if end < items.len() {
            Ok(Page::with_token(slice, end.to_string()))
        } else {
            Ok(Page::last(slice))
        }
    }

    fn model(&self, operation: &str, model_id: &str) -> Result<&AssetModelDescription> {
        self.models
            .iter()
            .find(|m| m.asset_model_id == model_id)
            .ok_or_else(|| {
                SiteWiseError::api(
                    operation,
                    format!("ResourceNotFoundException: asset model {} not found", model_id),
                )
            })
    }
}

impl SiteWiseApi for InMemorySiteWise {
    fn describe_asset(&self, asset_id: &str) -> Result<AssetDescription> {
        self.record(ApiCall::DescribeAsset(asset_id.to_string()));
        self.assets.get(asset_id).cloned().ok_or_else(|| {
            SiteWiseError::api(
                "describe-asset",
                format!("ResourceNotFoundException: asset {} not found", asset_id),
            )
        })
    }

    fn list_associated_assets(
        &self,
        asset_id: &str,
        hierarchy_id: &str,
        next_token: Option<&str>,
    ) -> Result<Page<AssetSummary>> {
        self.record(ApiCall::ListAssociatedAssets {
            asset_id: asset_id.to_string(),
            hierarchy_id: hierarchy_id.to_string(),
        });
        let children = self
            .associations
            .get(&(asset_id.to_string(), hierarchy_id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.page("list-associated-assets", children, next_token)
    }

    fn describe_asset_model(
        &self,
        model_id: &str,
        exclude_properties: bool,
    ) -> Result<AssetModelDescription> {
        self.record(ApiCall::DescribeAssetModel {
            model_id: model_id.to_string(),
            exclude_properties,
        });
        let model = self.model("describe-asset-model", model_id)?;
        if exclude_properties {
            Ok(model.without_properties())
        } else {
            Ok(model.clone())
        }
    }

    fn list_asset_models(&self, next_token: Option<&str>) -> Result<Page<AssetModelSummary>> {
        self.record(ApiCall::ListAssetModels);
        let summaries: Vec<AssetModelSummary> =
            self.models.iter().map(AssetModelDescription::summary).collect();
        self.page("list-asset-models", &summaries, next_token)
    }

    fn list_assets(&self, model_id: &str, next_token: Option<&str>) -> Result<Page<AssetSummary>> {
        self.record(ApiCall::ListAssets(model_id.to_string()));
        self.model("list-assets", model_id)?;
        let assets = self
            .model_assets
            .get(model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.page("list-assets", assets, next_token)
    }
}
