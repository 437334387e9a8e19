//! Asset model search
//!
//! Describes every asset model once and keeps the models satisfying all of
//! the requested conditions.

use crate::client::SiteWiseApi;
use crate::error::Result;
use crate::paginate::list_all_asset_models;
use crate::parent_map::ParentModelMap;
use crate::throttle::Throttle;
use crate::types::AssetModelSummary;
use serde::Serialize;

/// Requested conditions; a model must satisfy every active one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelFilter {
    /// Not declared as a hierarchy child by any other model
    pub no_hierarchy_references: bool,
    pub no_hierarchy_definitions: bool,
    pub no_properties: bool,
    /// No asset has been created from the model
    pub no_assets: bool,
}

impl ModelFilter {
    pub fn active_filter_count(&self) -> usize {
        [
            self.no_hierarchy_references,
            self.no_hierarchy_definitions,
            self.no_properties,
            self.no_assets,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Number of active conditions satisfied by a model
    pub fn filter_match_count(&self, attributes: &ModelAttributes) -> usize {
        let mut count = 0;
        if self.no_hierarchy_definitions && attributes.hierarchy_definition_count == 0 {
            count += 1;
        }
        if self.no_properties && attributes.property_count == 0 {
            count += 1;
        }
        if self.no_assets && attributes.has_assets == Some(false) {
            count += 1;
        }
        if self.no_hierarchy_references && !attributes.is_referenced {
            count += 1;
        }
        count
    }

    /// True when no filter is active or every active filter is satisfied
    pub fn matches(&self, attributes: &ModelAttributes) -> bool {
        let active = self.active_filter_count();
        active == 0 || self.filter_match_count(attributes) == active
    }
}

/// Facts gathered about one model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelAttributes {
    pub hierarchy_definition_count: usize,
    pub property_count: usize,
    /// `None` when assets were not checked
    pub has_assets: Option<bool>,
    pub is_referenced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAnalysis {
    pub model: AssetModelSummary,
    pub attributes: ModelAttributes,
}

/// Exported line of the search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRow {
    #[serde(rename = "Model Name")]
    pub name: String,
    #[serde(rename = "Model ID")]
    pub id: String,
}

impl From<&AssetModelSummary> for ModelRow {
    fn from(model: &AssetModelSummary) -> Self {
        Self {
            name: model.name.clone(),
            id: model.id.clone(),
        }
    }
}

/// Completion percentage rounded to one decimal
pub fn progress_percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (done as f64 / total as f64 * 1000.0).round() / 10.0
}

pub struct SearchOptions {
    /// Between listing pages
    pub pagination: Throttle,
    /// After each analyzed model (one describe plus at most one list call)
    pub per_model: Throttle,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pagination: Throttle::none(),
            per_model: Throttle::none(),
        }
    }
}

pub struct ModelSearch<'a, C: SiteWiseApi + ?Sized> {
    client: &'a C,
    options: SearchOptions,
}

impl<'a, C: SiteWiseApi + ?Sized> ModelSearch<'a, C> {
    pub fn new(client: &'a C, options: SearchOptions) -> Self {
        Self { client, options }
    }

    /// Gather attributes of every model
    ///
    /// `progress` is called with (analyzed, total) after each model. Asset
    /// listings are only requested when `filter.no_assets` is set.
    pub fn analyze(
        &self,
        filter: &ModelFilter,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<Vec<ModelAnalysis>> {
        let models = list_all_asset_models(self.client, &self.options.pagination)?;
        log::info!("Analyzing {} models", models.len());

        let mut parent_map = ParentModelMap::new();
        let mut analyses = Vec::with_capacity(models.len());

        for (idx, model) in models.iter().enumerate() {
            let description = self.client.describe_asset_model(&model.id, false)?;
            let has_assets = if filter.no_assets {
                Some(self.has_assets(&model.id)?)
            } else {
                None
            };
            parent_map.record(&description);

            analyses.push(ModelAnalysis {
                model: model.clone(),
                attributes: ModelAttributes {
                    hierarchy_definition_count: description.asset_model_hierarchies.len(),
                    property_count: description.asset_model_properties.len(),
                    has_assets,
                    is_referenced: false,
                },
            });

            progress(idx + 1, models.len());
            self.options.per_model.wait();
        }

        // References are only known once every model has been described
        for analysis in &mut analyses {
            analysis.attributes.is_referenced = parent_map.is_referenced(&analysis.model.id);
        }

        Ok(analyses)
    }

    /// Models satisfying `filter`, in listing order
    pub fn run(
        &self,
        filter: &ModelFilter,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<Vec<AssetModelSummary>> {
        let analyses = self.analyze(filter, progress)?;
        Ok(analyses
            .into_iter()
            .filter(|a| filter.matches(&a.attributes))
            .map(|a| a.model)
            .collect())
    }

    /// First page of assets is enough to know whether any exist
    fn has_assets(&self, model_id: &str) -> Result<bool> {
        let page = self.client.list_assets(model_id, None)?;
        Ok(!page.items.is_empty())
    }
}
