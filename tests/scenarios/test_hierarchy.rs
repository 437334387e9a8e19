//! Asset hierarchy walker tests

#[cfg(test)]
mod hierarchy_tests {
    use super::super::fixtures::*;
    use sitewise_tools::client::{ApiCall, InMemorySiteWise};
    use sitewise_tools::error::SiteWiseError;
    use sitewise_tools::hierarchy::{HierarchyLine, HierarchyOptions, HierarchyWalker};
    use sitewise_tools::throttle::Throttle;
    use sitewise_tools::types::{AssetDescription, AssetSummary};

    fn describe_calls(service: &InMemorySiteWise) -> usize {
        service.count_calls(|c| matches!(c, ApiCall::DescribeAsset(_)))
    }

    #[test]
    fn test_single_level_lists_direct_children() {
        let service = asset_tree();
        let throttle = Throttle::none();
        let walker = HierarchyWalker::new(&service, &throttle, HierarchyOptions::default());

        let report = walker.walk(ROOT_ASSET).unwrap();

        assert_eq!(report.header(), format!("Asset Name: X, Asset Id: {}", ROOT_ASSET));
        assert_eq!(
            report.render(),
            vec![
                "|__ Asset Name: Y, Asset Id: y".to_string(),
                "|__ Asset Name: Z, Asset Id: z".to_string(),
            ]
        );
        // only the root is described; Y and Z are not expanded
        assert_eq!(describe_calls(&service), 1);
    }

    #[test]
    fn test_all_levels_recurses() {
        let service = asset_tree();
        let throttle = Throttle::none();
        let options = HierarchyOptions {
            all_levels: true,
            ..Default::default()
        };
        let walker = HierarchyWalker::new(&service, &throttle, options);

        let report = walker.walk(ROOT_ASSET).unwrap();

        assert_eq!(
            report.render(),
            vec![
                "|__ Asset Name: Y, Asset Id: y".to_string(),
                "   |__ Asset Name: W, Asset Id: w".to_string(),
                "|__ Asset Name: Z, Asset Id: z".to_string(),
            ]
        );
        assert_eq!(describe_calls(&service), 4);
    }

    #[test]
    fn test_children_across_hierarchies_and_pages() {
        let mut service = InMemorySiteWise::new().with_page_size(2);
        service.add_asset(
            AssetDescription::new(ROOT_ASSET, "Site")
                .with_hierarchy("h1", "Lines")
                .with_hierarchy("h2", "Utilities"),
        );
        for i in 0..3 {
            let line = AssetSummary::new(format!("l{}", i), format!("Line {}", i));
            service.associate(ROOT_ASSET, "h1", line);
        }
        service.associate(ROOT_ASSET, "h2", AssetSummary::new("u0", "Boiler"));
        let throttle = Throttle::none();
        let walker = HierarchyWalker::new(&service, &throttle, HierarchyOptions::default());

        let children = walker.child_assets(ROOT_ASSET).unwrap();

        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Line 0", "Line 1", "Line 2", "Boiler"]);
        assert_eq!(
            service.count_calls(|c| matches!(c, ApiCall::ListAssociatedAssets { .. })),
            3
        );
    }

    #[test]
    fn test_streaming_lines() {
        let service = asset_tree();
        let throttle = Throttle::none();
        let walker = HierarchyWalker::new(&service, &throttle, HierarchyOptions::default());
        let root = walker.root(ROOT_ASSET).unwrap();

        let mut depths = Vec::new();
        walker
            .walk_from(&root, &mut |line: &HierarchyLine| depths.push(line.depth))
            .unwrap();

        assert_eq!(depths, vec![0, 0]);
    }

    #[test]
    fn test_invalid_root_rejected_before_calls() {
        let service = asset_tree();
        let throttle = Throttle::none();
        let walker = HierarchyWalker::new(&service, &throttle, HierarchyOptions::default());

        let err = walker.walk("066e9d16-b369").unwrap_err();

        assert!(matches!(err, SiteWiseError::InvalidInput(_)));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_asset_cycle_detected() {
        let mut service = InMemorySiteWise::new();
        service.add_asset(AssetDescription::new(ROOT_ASSET, "X").with_hierarchy("h", "H"));
        service.add_asset(AssetDescription::new("y", "Y").with_hierarchy("h", "H"));
        service.associate(ROOT_ASSET, "h", AssetSummary::new("y", "Y"));
        service.associate("y", "h", AssetSummary::new(ROOT_ASSET, "X"));
        let throttle = Throttle::none();
        let options = HierarchyOptions {
            all_levels: true,
            ..Default::default()
        };
        let walker = HierarchyWalker::new(&service, &throttle, options);

        let err = walker.walk(ROOT_ASSET).unwrap_err();

        assert!(matches!(err, SiteWiseError::CycleDetected { .. }));
    }

    #[test]
    fn test_missing_asset_propagates_api_error() {
        let service = InMemorySiteWise::new();
        let throttle = Throttle::none();
        let walker = HierarchyWalker::new(&service, &throttle, HierarchyOptions::default());

        let err = walker.walk(ROOT_ASSET).unwrap_err();

        assert!(matches!(err, SiteWiseError::Api { .. }));
    }
}
