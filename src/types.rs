//! Core types mirroring the SiteWise API payloads

use serde::{Deserialize, Serialize};

/// Identifier of an asset, asset model, hierarchy or property
pub type ResourceId = String;

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token; present when more pages follow
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Final page with no continuation token
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Page followed by more results
    pub fn with_token(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// Asset summary returned by asset listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: ResourceId,
    pub name: String,
}

impl AssetSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Hierarchy declared on an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHierarchy {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
}

/// Result of describing an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescription {
    pub asset_id: ResourceId,
    pub asset_name: String,
    #[serde(default)]
    pub asset_model_id: Option<ResourceId>,
    #[serde(default)]
    pub asset_hierarchies: Vec<AssetHierarchy>,
}

impl AssetDescription {
    pub fn new(asset_id: impl Into<String>, asset_name: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_name: asset_name.into(),
            asset_model_id: None,
            asset_hierarchies: Vec::new(),
        }
    }

    /// Add a hierarchy to the description
    pub fn with_hierarchy(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.asset_hierarchies.push(AssetHierarchy {
            id: id.into(),
            name: name.into(),
        });
        self
    }
}

/// Asset model summary returned by model listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetModelSummary {
    pub id: ResourceId,
    pub name: String,
}

impl AssetModelSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Hierarchy definition on an asset model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetModelHierarchy {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
    pub child_asset_model_id: ResourceId,
}

/// Reference from a metric variable to another property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableValue {
    #[serde(default)]
    pub property_id: Option<ResourceId>,
    /// Set when the property lives on a child model reached through this hierarchy
    #[serde(default)]
    pub hierarchy_id: Option<ResourceId>,
}

/// Named input of a metric or transform expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionVariable {
    pub name: String,
    pub value: VariableValue,
}

impl ExpressionVariable {
    /// Variable bound to a property of the same model
    pub fn local(name: impl Into<String>, property_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: VariableValue {
                property_id: Some(property_id.into()),
                hierarchy_id: None,
            },
        }
    }

    /// Variable bound to a child-model property through a hierarchy
    pub fn through(
        name: impl Into<String>,
        property_id: impl Into<String>,
        hierarchy_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: VariableValue {
                property_id: Some(property_id.into()),
                hierarchy_id: Some(hierarchy_id.into()),
            },
        }
    }
}

/// Metric definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub variables: Option<Vec<ExpressionVariable>>,
}

/// Property type, serialized as a single-key object keyed by the type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Attribute(serde_json::Value),
    Measurement(serde_json::Value),
    Transform(serde_json::Value),
    Metric(Metric),
}

impl PropertyType {
    /// The type tag as it appears on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyType::Attribute(_) => "attribute",
            PropertyType::Measurement(_) => "measurement",
            PropertyType::Transform(_) => "transform",
            PropertyType::Metric(_) => "metric",
        }
    }

    /// Variables of a metric; `None` for other types and for metrics without variables
    pub fn metric_variables(&self) -> Option<&[ExpressionVariable]> {
        match self {
            PropertyType::Metric(metric) => metric.variables.as_deref(),
            _ => None,
        }
    }
}

/// Property definition on an asset model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetModelProperty {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

impl AssetModelProperty {
    /// Measurement property, used for raw inputs
    pub fn measurement(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type: Some("DOUBLE".to_string()),
            property_type: PropertyType::Measurement(serde_json::json!({})),
        }
    }

    /// Metric property computed from the given variables
    pub fn metric(
        id: impl Into<String>,
        name: impl Into<String>,
        variables: Vec<ExpressionVariable>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type: Some("DOUBLE".to_string()),
            property_type: PropertyType::Metric(Metric {
                expression: None,
                variables: Some(variables),
            }),
        }
    }
}

/// Result of describing an asset model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetModelDescription {
    pub asset_model_id: ResourceId,
    pub asset_model_name: String,
    #[serde(default)]
    pub asset_model_properties: Vec<AssetModelProperty>,
    #[serde(default)]
    pub asset_model_hierarchies: Vec<AssetModelHierarchy>,
}

impl AssetModelDescription {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            asset_model_id: id.into(),
            asset_model_name: name.into(),
            asset_model_properties: Vec::new(),
            asset_model_hierarchies: Vec::new(),
        }
    }

    /// Add a hierarchy definition pointing at a child model
    pub fn with_hierarchy(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        child_asset_model_id: impl Into<String>,
    ) -> Self {
        self.asset_model_hierarchies.push(AssetModelHierarchy {
            id: id.into(),
            name: name.into(),
            child_asset_model_id: child_asset_model_id.into(),
        });
        self
    }

    /// Add a property definition
    pub fn with_property(mut self, property: AssetModelProperty) -> Self {
        self.asset_model_properties.push(property);
        self
    }

    /// Copy of this description without property definitions
    pub fn without_properties(&self) -> Self {
        Self {
            asset_model_properties: Vec::new(),
            ..self.clone()
        }
    }

    /// Look up a property name by id
    pub fn property_name(&self, property_id: &str) -> Option<&str> {
        self.asset_model_properties
            .iter()
            .find(|p| p.id == property_id)
            .map(|p| p.name.as_str())
    }

    /// Look up the child model of a hierarchy by hierarchy id
    pub fn child_model_of(&self, hierarchy_id: &str) -> Option<&str> {
        self.asset_model_hierarchies
            .iter()
            .find(|h| h.id == hierarchy_id)
            .map(|h| h.child_asset_model_id.as_str())
    }

    pub fn summary(&self) -> AssetModelSummary {
        AssetModelSummary::new(&self.asset_model_id, &self.asset_model_name)
    }
}
