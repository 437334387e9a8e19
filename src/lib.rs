//! # sitewise-tools
//!
//! Reporting tools for AWS IoT SiteWise asset hierarchies and asset models.
//!
//! Three command-line tools are built on this library:
//!
//! - `asset-hierarchy` prints the tree of child assets below an asset;
//! - `model-references` exports everything that depends on an asset model
//!   (assets, hierarchy definitions, metric properties on parent models);
//! - `search-models` exports the asset models matching a set of conditions.
//!
//! ## Example
//!
//! ```rust
//! use sitewise_tools::prelude::*;
//!
//! let mut service = InMemorySiteWise::new();
//! service.add_model(AssetModelDescription::new("m1", "Pump"));
//!
//! let search = ModelSearch::new(&service, SearchOptions::default());
//! let filter = ModelFilter { no_assets: true, ..Default::default() };
//! let models = search.run(&filter, &mut |_: usize, _: usize| {}).unwrap();
//! assert_eq!(models.len(), 1);
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod guard;
pub mod hierarchy;
pub mod paginate;
pub mod parent_map;
pub mod references;
pub mod search;
pub mod throttle;
pub mod types;
pub mod validate;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::client::{AwsCliClient, InMemorySiteWise, SiteWiseApi};
    pub use crate::config::Config;
    pub use crate::error::{Result, SiteWiseError};
    pub use crate::export::CsvExporter;
    pub use crate::hierarchy::{HierarchyOptions, HierarchyWalker};
    pub use crate::parent_map::ParentModelMap;
    pub use crate::references::{ReferenceKind, ReferenceReport, ReferenceTracer, TraceOptions};
    pub use crate::search::{ModelFilter, ModelSearch, SearchOptions};
    pub use crate::throttle::Throttle;
    pub use crate::types::*;
    pub use crate::validate::valid_uuid;
}
