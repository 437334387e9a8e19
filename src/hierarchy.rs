//! Asset hierarchy walker
//!
//! Lists the child assets of a root asset across all of its hierarchies,
//! optionally descending to every level, and renders them as an indented
//! tree:
//!
//! ```text
//! Asset Name: Plant, Asset Id: 2c8249d7-...
//! |__ Asset Name: Line 1, Asset Id: 8f1e...
//!    |__ Asset Name: Press, Asset Id: 51aa...
//! ```

use crate::client::SiteWiseApi;
use crate::error::Result;
use crate::guard::{Deadline, TraversalPath};
use crate::paginate::list_all_associated_assets;
use crate::throttle::Throttle;
use crate::types::{AssetDescription, AssetSummary};
use crate::validate::require_uuid;
use std::fmt;
use std::time::Duration;

/// Spaces of indentation per level
pub const INDENT_WIDTH: usize = 3;

/// Default wall-clock limit for a walk
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct HierarchyOptions {
    /// Descend below the first level of children
    pub all_levels: bool,
    pub timeout: Duration,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            all_levels: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One printed child asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyLine {
    /// 0 for direct children of the root
    pub depth: usize,
    pub name: String,
    pub id: String,
}

impl fmt::Display for HierarchyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|__ Asset Name: {}, Asset Id: {}",
            " ".repeat(INDENT_WIDTH * self.depth),
            self.name,
            self.id
        )
    }
}

/// Complete walk result
#[derive(Debug, Clone)]
pub struct HierarchyReport {
    pub root: AssetSummary,
    pub lines: Vec<HierarchyLine>,
}

impl HierarchyReport {
    pub fn header(&self) -> String {
        format!("Asset Name: {}, Asset Id: {}", self.root.name, self.root.id)
    }

    /// Indented child lines in print order
    pub fn render(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

pub struct HierarchyWalker<'a, C: SiteWiseApi + ?Sized> {
    client: &'a C,
    throttle: &'a Throttle,
    options: HierarchyOptions,
    deadline: Deadline,
}

impl<'a, C: SiteWiseApi + ?Sized> HierarchyWalker<'a, C> {
    /// Create a walker; the deadline starts now
    pub fn new(client: &'a C, throttle: &'a Throttle, options: HierarchyOptions) -> Self {
        let deadline = Deadline::new(options.timeout);
        Self {
            client,
            throttle,
            options,
            deadline,
        }
    }

    /// Validate and describe the root asset
    pub fn root(&self, asset_id: &str) -> Result<AssetDescription> {
        require_uuid("Asset ID", asset_id)?;
        self.client.describe_asset(asset_id)
    }

    /// Walk from `asset_id`, collecting every line
    pub fn walk(&self, asset_id: &str) -> Result<HierarchyReport> {
        let root = self.root(asset_id)?;
        let mut lines = Vec::new();
        self.walk_from(&root, &mut |line: &HierarchyLine| lines.push(line.clone()))?;
        Ok(HierarchyReport {
            root: AssetSummary::new(root.asset_id, root.asset_name),
            lines,
        })
    }

    /// Walk below an already described root, handing each line to `on_line` as it is found
    pub fn walk_from(
        &self,
        root: &AssetDescription,
        on_line: &mut dyn FnMut(&HierarchyLine),
    ) -> Result<()> {
        let children = self.children_of(root)?;
        let mut path = TraversalPath::new();
        path.enter(&root.asset_id)?;
        self.visit(&children, 0, &mut path, on_line)
    }

    /// All child assets of `asset_id` across its hierarchies
    pub fn child_assets(&self, asset_id: &str) -> Result<Vec<AssetSummary>> {
        let description = self.client.describe_asset(asset_id)?;
        self.children_of(&description)
    }

    fn children_of(&self, asset: &AssetDescription) -> Result<Vec<AssetSummary>> {
        let mut children = Vec::new();
        for hierarchy in &asset.asset_hierarchies {
            let associated = list_all_associated_assets(
                self.client,
                &asset.asset_id,
                &hierarchy.id,
                self.throttle,
            )?;
            log::debug!(
                "Hierarchy {} of {} has {} assets",
                hierarchy.name,
                asset.asset_name,
                associated.len()
            );
            children.extend(associated);
            self.throttle.wait();
        }
        Ok(children)
    }

    fn visit(
        &self,
        children: &[AssetSummary],
        depth: usize,
        path: &mut TraversalPath,
        on_line: &mut dyn FnMut(&HierarchyLine),
    ) -> Result<()> {
        self.deadline.check()?;
        for child in children {
            on_line(&HierarchyLine {
                depth,
                name: child.name.clone(),
                id: child.id.clone(),
            });
            if !self.options.all_levels {
                continue;
            }
            path.enter(&child.id)?;
            let grandchildren = self.child_assets(&child.id)?;
            if !grandchildren.is_empty() {
                self.visit(&grandchildren, depth + 1, path, on_line)?;
            }
            path.leave();
        }
        Ok(())
    }
}
