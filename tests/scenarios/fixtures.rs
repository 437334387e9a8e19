//! Shared fixtures
//!
//! Reference chain used by the tracer tests:
//!
//! ```text
//! Plant --(Lines)--> Line --(Pumps)--> Pump
//! ```
//!
//! Line has metrics reading Pump's flow through "Pumps"; Plant has a metric
//! reading Line's total flow through "Lines".

use sitewise_tools::client::InMemorySiteWise;
use sitewise_tools::types::{
    AssetDescription, AssetModelDescription, AssetModelProperty, AssetSummary,
    ExpressionVariable,
};

pub const PUMP_MODEL: &str = "6f1d8c5e-2b1a-4d3c-9e8f-0a1b2c3d4e01";
pub const LINE_MODEL: &str = "6f1d8c5e-2b1a-4d3c-9e8f-0a1b2c3d4e02";
pub const PLANT_MODEL: &str = "6f1d8c5e-2b1a-4d3c-9e8f-0a1b2c3d4e03";
pub const ORPHAN_MODEL: &str = "6f1d8c5e-2b1a-4d3c-9e8f-0a1b2c3d4e04";

pub const PUMPS_HIERARCHY: &str = "h-pumps";
pub const LINES_HIERARCHY: &str = "h-lines";

pub const ROOT_ASSET: &str = "0b7c1a52-8e4f-4c47-a0a5-6a1f3e9d2c10";

pub fn reference_chain() -> InMemorySiteWise {
    let mut service = InMemorySiteWise::new().with_page_size(1);

    service.add_model(
        AssetModelDescription::new(PUMP_MODEL, "Pump")
            .with_property(AssetModelProperty::measurement("p-flow", "Flow")),
    );
    service.add_model(
        AssetModelDescription::new(LINE_MODEL, "Line")
            .with_hierarchy(PUMPS_HIERARCHY, "Pumps", PUMP_MODEL)
            .with_property(AssetModelProperty::measurement("l-speed", "Speed"))
            .with_property(AssetModelProperty::metric(
                "l-total",
                "Total Flow",
                vec![ExpressionVariable::through("flow", "p-flow", PUMPS_HIERARCHY)],
            ))
            .with_property(AssetModelProperty::metric(
                "l-avg-speed",
                "Average Speed",
                vec![ExpressionVariable::local("speed", "l-speed")],
            ))
            .with_property(AssetModelProperty::metric(
                "l-ratio",
                "Flow per Speed",
                vec![
                    ExpressionVariable::through("flow", "p-flow", PUMPS_HIERARCHY),
                    ExpressionVariable::local("speed", "l-speed"),
                ],
            )),
    );
    service.add_model(
        AssetModelDescription::new(PLANT_MODEL, "Plant")
            .with_hierarchy(LINES_HIERARCHY, "Lines", LINE_MODEL)
            .with_property(AssetModelProperty::metric(
                "t-flow",
                "Plant Flow",
                vec![ExpressionVariable::through("total", "l-total", LINES_HIERARCHY)],
            ))
            .with_property(AssetModelProperty::metric(
                "t-speed",
                "Max Line Speed",
                vec![ExpressionVariable::through("speed", "l-speed", LINES_HIERARCHY)],
            )),
    );
    service.add_model(AssetModelDescription::new(ORPHAN_MODEL, "Orphan"));

    service.add_model_asset(PUMP_MODEL, AssetSummary::new("a-pump-1", "Pump 1"));
    service.add_model_asset(PUMP_MODEL, AssetSummary::new("a-pump-2", "Pump 2"));
    service.add_model_asset(LINE_MODEL, AssetSummary::new("a-line-1", "Line 1"));

    service
}

/// X has one hierarchy H with children Y and Z; Y has one child W
pub fn asset_tree() -> InMemorySiteWise {
    let mut service = InMemorySiteWise::new();

    service.add_asset(AssetDescription::new(ROOT_ASSET, "X").with_hierarchy("h", "H"));
    service.add_asset(AssetDescription::new("y", "Y").with_hierarchy("hy", "HY"));
    service.add_asset(AssetDescription::new("z", "Z"));
    service.add_asset(AssetDescription::new("w", "W"));

    service.associate(ROOT_ASSET, "h", AssetSummary::new("y", "Y"));
    service.associate(ROOT_ASSET, "h", AssetSummary::new("z", "Z"));
    service.associate("y", "hy", AssetSummary::new("w", "W"));

    service
}
