//! Model reference tracer
//!
//! Starting from a root asset model, walks upward through every model that
//! declares it as a hierarchy child and records what would be affected by
//! changing or deleting the root:
//!
//! - level 1: assets created from the root model, and the hierarchy
//!   definitions pointing at it;
//! - level n + 1: metric properties of a referencing model that read a
//!   property from level n through that hierarchy.
//!
//! The walk continues above every model that contributed at least one
//! dependent property.

use crate::client::SiteWiseApi;
use crate::error::Result;
use crate::guard::{Deadline, TraversalPath};
use crate::paginate::{list_all_asset_models, list_all_assets};
use crate::parent_map::ParentModelMap;
use crate::throttle::Throttle;
use crate::types::AssetModelDescription;
use crate::validate::require_uuid;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Default wall-clock limit for a trace
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Kind of an exported reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Asset,
    #[serde(rename = "Hierarchy Definition")]
    HierarchyDefinition,
    Property,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Asset => write!(f, "Asset"),
            ReferenceKind::HierarchyDefinition => write!(f, "Hierarchy Definition"),
            ReferenceKind::Property => write!(f, "Property"),
        }
    }
}

/// One exported line; field order is the CSV column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    #[serde(rename = "Reference Level")]
    pub level: u32,
    #[serde(rename = "Reference Type")]
    pub kind: ReferenceKind,
    #[serde(rename = "Asset Name")]
    pub asset_name: String,
    #[serde(rename = "Asset ID")]
    pub asset_id: String,
    #[serde(rename = "Hierarchy Name")]
    pub hierarchy_name: String,
    #[serde(rename = "Hierarchy ID")]
    pub hierarchy_id: String,
    #[serde(rename = "Model Name")]
    pub model_name: String,
    #[serde(rename = "Model ID")]
    pub model_id: String,
    #[serde(rename = "Property Name")]
    pub property_name: String,
    #[serde(rename = "Property ID")]
    pub property_id: String,
    #[serde(rename = "Property Type")]
    pub property_type: String,
    #[serde(rename = "Property Dependent On")]
    pub dependent_on: String,
}

impl ReferenceRow {
    fn empty(level: u32, kind: ReferenceKind) -> Self {
        Self {
            level,
            kind,
            asset_name: String::new(),
            asset_id: String::new(),
            hierarchy_name: String::new(),
            hierarchy_id: String::new(),
            model_name: String::new(),
            model_id: String::new(),
            property_name: String::new(),
            property_id: String::new(),
            property_type: String::new(),
            dependent_on: String::new(),
        }
    }

    pub fn asset(level: u32, name: &str, id: &str) -> Self {
        Self {
            asset_name: name.to_string(),
            asset_id: id.to_string(),
            ..Self::empty(level, ReferenceKind::Asset)
        }
    }

    pub fn hierarchy(level: u32, reference: &HierarchyReference) -> Self {
        Self {
            hierarchy_name: reference.hierarchy_name.clone(),
            hierarchy_id: reference.hierarchy_id.clone(),
            model_name: reference.parent_model_name.clone(),
            model_id: reference.parent_model_id.clone(),
            ..Self::empty(level, ReferenceKind::HierarchyDefinition)
        }
    }

    pub fn property(
        level: u32,
        reference: &HierarchyReference,
        property: &DependentProperty,
    ) -> Self {
        Self {
            property_name: property.name.clone(),
            property_id: property.id.clone(),
            property_type: property.type_name.clone(),
            dependent_on: property.dependent_on.clone(),
            ..Self::hierarchy(level, reference)
        }
        .with_kind(ReferenceKind::Property)
    }

    fn with_kind(mut self, kind: ReferenceKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A hierarchy on a parent model pointing at a given child model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyReference {
    pub parent_model_id: String,
    pub parent_model_name: String,
    pub hierarchy_id: String,
    pub hierarchy_name: String,
}

/// Metric property depending on properties of a lower level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentProperty {
    pub id: String,
    pub name: String,
    pub type_name: String,
    /// Names of every input property, each followed by a comma
    pub dependent_on: String,
}

/// Accumulated trace result
#[derive(Debug, Clone, Default)]
pub struct ReferenceReport {
    pub root_model_name: String,
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceReport {
    pub fn new(root_model_name: impl Into<String>) -> Self {
        Self {
            root_model_name: root_model_name.into(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the given kind
    pub fn rows_of(&self, kind: ReferenceKind) -> impl Iterator<Item = &ReferenceRow> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }

    /// Highest reference level reached
    pub fn max_level(&self) -> u32 {
        self.rows.iter().map(|r| r.level).max().unwrap_or(0)
    }
}

/// Throttles and limits applied during a trace
pub struct TraceOptions {
    /// Between listing pages
    pub pagination: Throttle,
    /// Between describe calls while indexing parent models
    pub parent_map: Throttle,
    pub timeout: Duration,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            pagination: Throttle::none(),
            parent_map: Throttle::none(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

type Progress<'a> = Box<dyn Fn(&str) + 'a>;

pub struct ReferenceTracer<'a, C: SiteWiseApi + ?Sized> {
    client: &'a C,
    options: TraceOptions,
    deadline: Deadline,
    progress: Option<Progress<'a>>,
}

impl<'a, C: SiteWiseApi + ?Sized> ReferenceTracer<'a, C> {
    /// Create a tracer; the deadline starts now
    pub fn new(client: &'a C, options: TraceOptions) -> Self {
        let deadline = Deadline::new(options.timeout);
        Self {
            client,
            options,
            deadline,
            progress: None,
        }
    }

    /// Receive the name of each parent model as it is checked
    pub fn with_progress(mut self, progress: impl Fn(&str) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// List every model and index parent references
    pub fn build_parent_map(&self) -> Result<ParentModelMap> {
        let models = list_all_asset_models(self.client, &self.options.pagination)?;
        log::info!("Building a map of hierarchy references for {} models", models.len());
        ParentModelMap::build(self.client, &models, &self.options.parent_map)
    }

    /// Validate the root id, index all models and trace references
    pub fn trace(&self, root_model_id: &str) -> Result<ReferenceReport> {
        require_uuid("Asset Model ID", root_model_id)?;
        let parent_map = self.build_parent_map()?;
        self.trace_with(&parent_map, root_model_id)
    }

    /// Trace references using an already built parent map
    pub fn trace_with(
        &self,
        parent_map: &ParentModelMap,
        root_model_id: &str,
    ) -> Result<ReferenceReport> {
        let root = self.client.describe_asset_model(root_model_id, true)?;
        log::info!("Finding references for model: {}", root.asset_model_name);

        let mut report = ReferenceReport::new(root.asset_model_name);
        let mut path = TraversalPath::new();
        path.enter(root_model_id)?;
        self.collect(parent_map, root_model_id, 1, &[], &mut path, &mut report)?;
        Ok(report)
    }

    fn collect(
        &self,
        parent_map: &ParentModelMap,
        model_id: &str,
        level: u32,
        lower_level: &[DependentProperty],
        path: &mut TraversalPath,
        report: &mut ReferenceReport,
    ) -> Result<()> {
        self.deadline.check()?;

        if level == 1 {
            let assets = list_all_assets(self.client, model_id, &self.options.pagination)?;
            report
                .rows
                .extend(assets.iter().map(|a| ReferenceRow::asset(level, &a.name, &a.id)));
        }

        for reference in self.hierarchy_references(parent_map, model_id)? {
            if level == 1 {
                report.rows.push(ReferenceRow::hierarchy(level, &reference));
            }

            let properties = self.dependent_properties(
                &reference.parent_model_id,
                &reference.hierarchy_id,
                lower_level,
            )?;
            report.rows.extend(
                properties
                    .iter()
                    .map(|p| ReferenceRow::property(level + 1, &reference, p)),
            );

            if let Some(ref progress) = self.progress {
                progress(&reference.parent_model_name);
            }
            log::info!(
                "Checking references at model: {} (level {})",
                reference.parent_model_name,
                level + 1
            );

            if !properties.is_empty() {
                path.enter(&reference.parent_model_id)?;
                self.collect(
                    parent_map,
                    &reference.parent_model_id,
                    level + 1,
                    &properties,
                    path,
                    report,
                )?;
                path.leave();
            }
        }

        Ok(())
    }

    /// Hierarchies on other models whose child is `child_model_id`
    pub fn hierarchy_references(
        &self,
        parent_map: &ParentModelMap,
        child_model_id: &str,
    ) -> Result<Vec<HierarchyReference>> {
        let mut references = Vec::new();
        for parent_id in parent_map.parents_of(child_model_id) {
            let parent = self.client.describe_asset_model(parent_id, true)?;
            references.extend(
                parent
                    .asset_model_hierarchies
                    .iter()
                    .filter(|h| h.child_asset_model_id == child_model_id)
                    .map(|h| HierarchyReference {
                        parent_model_id: parent_id.clone(),
                        parent_model_name: parent.asset_model_name.clone(),
                        hierarchy_id: h.id.clone(),
                        hierarchy_name: h.name.clone(),
                    }),
            );
        }
        Ok(references)
    }

    /// Metric properties of `model_id` reading a lower-level property through `hierarchy_id`
    ///
    /// With an empty `lower_level` set, any metric reading through the
    /// hierarchy qualifies.
    pub fn dependent_properties(
        &self,
        model_id: &str,
        hierarchy_id: &str,
        lower_level: &[DependentProperty],
    ) -> Result<Vec<DependentProperty>> {
        let model = self.client.describe_asset_model(model_id, false)?;
        let mut properties = Vec::new();

        for property in &model.asset_model_properties {
            let Some(variables) = property.property_type.metric_variables() else {
                continue;
            };

            let mut include = false;
            let mut dependent_on = String::new();
            for variable in variables {
                let property_id = variable.value.property_id.as_deref();
                let lower = property_id.and_then(|id| lower_level.iter().find(|p| p.id == id));

                let name = match (variable.value.hierarchy_id.as_deref(), lower) {
                    (Some(_), Some(lower)) => lower.name.clone(),
                    (Some(through), None) => {
                        self.child_property_name(&model, through, property_id)?
                    }
                    (None, _) => property_id
                        .and_then(|id| model.property_name(id))
                        .unwrap_or_default()
                        .to_string(),
                };
                dependent_on.push_str(&name);
                dependent_on.push(',');

                if variable.value.hierarchy_id.as_deref() == Some(hierarchy_id)
                    && (lower.is_some() || lower_level.is_empty())
                {
                    include = true;
                }
            }

            if include {
                properties.push(DependentProperty {
                    id: property.id.clone(),
                    name: property.name.clone(),
                    type_name: property.property_type.type_name().to_string(),
                    dependent_on,
                });
            }
        }

        Ok(properties)
    }

    /// Name of a property on the child model reached through `hierarchy_id`
    fn child_property_name(
        &self,
        model: &AssetModelDescription,
        hierarchy_id: &str,
        property_id: Option<&str>,
    ) -> Result<String> {
        let (Some(child_id), Some(property_id)) = (model.child_model_of(hierarchy_id), property_id)
        else {
            log::warn!(
                "Cannot resolve variable through hierarchy {} of model {}",
                hierarchy_id,
                model.asset_model_name
            );
            return Ok(String::new());
        };
        let child = self.client.describe_asset_model(child_id, false)?;
        Ok(child.property_name(property_id).unwrap_or_default().to_string())
    }
}
