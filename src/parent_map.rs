//! Child model -> parent models index
//!
//! SiteWise only exposes hierarchy definitions from the parent side, so
//! finding who references a model means describing every model once.

use crate::client::SiteWiseApi;
use crate::error::Result;
use crate::throttle::Throttle;
use crate::types::{AssetModelDescription, AssetModelSummary};
use hashbrown::HashMap;

/// Maps a child model id to the ids of models declaring it as a hierarchy child
#[derive(Debug, Clone, Default)]
pub struct ParentModelMap {
    parents: HashMap<String, Vec<String>>,
}

impl ParentModelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe every model (without properties) and index its hierarchies
    pub fn build<C: SiteWiseApi + ?Sized>(
        client: &C,
        models: &[AssetModelSummary],
        throttle: &Throttle,
    ) -> Result<Self> {
        let mut map = Self::new();
        for model in models {
            let description = client.describe_asset_model(&model.id, true)?;
            map.record(&description);
            throttle.wait();
        }
        log::info!(
            "Indexed hierarchy references of {} models ({} referenced)",
            models.len(),
            map.len()
        );
        Ok(map)
    }

    /// Index the hierarchies declared by `parent`
    ///
    /// A parent is listed once per child even when several of its hierarchies
    /// point at that child.
    pub fn record(&mut self, parent: &AssetModelDescription) {
        for hierarchy in &parent.asset_model_hierarchies {
            let parents = self
                .parents
                .entry(hierarchy.child_asset_model_id.clone())
                .or_default();
            if !parents.contains(&parent.asset_model_id) {
                parents.push(parent.asset_model_id.clone());
            }
        }
    }

    /// Parents of `child_id` in indexing order
    pub fn parents_of(&self, child_id: &str) -> &[String] {
        self.parents
            .get(child_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when some model declares `model_id` as a hierarchy child
    pub fn is_referenced(&self, model_id: &str) -> bool {
        self.parents.contains_key(model_id)
    }

    /// Number of referenced child models
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
