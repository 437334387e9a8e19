//! Model search tests

#[cfg(test)]
mod search_tests {
    use super::super::fixtures::*;
    use sitewise_tools::client::{ApiCall, InMemorySiteWise};
    use sitewise_tools::search::{ModelFilter, ModelSearch, SearchOptions};
    use sitewise_tools::types::{AssetModelDescription, AssetModelProperty, AssetSummary};

    /// A is bare; B has two hierarchy definitions, three properties and an asset
    fn bare_and_busy() -> InMemorySiteWise {
        let mut service = InMemorySiteWise::new();
        service.add_model(AssetModelDescription::new("a", "A"));
        service.add_model(
            AssetModelDescription::new("b", "B")
                .with_hierarchy("b1", "First", "a")
                .with_hierarchy("b2", "Second", "c")
                .with_property(AssetModelProperty::measurement("p1", "One"))
                .with_property(AssetModelProperty::measurement("p2", "Two"))
                .with_property(AssetModelProperty::measurement("p3", "Three")),
        );
        service.add_model(AssetModelDescription::new("c", "C"));
        service.add_model_asset("b", AssetSummary::new("b-asset", "B Asset"));
        service
    }

    fn ignore_progress() -> impl FnMut(usize, usize) {
        |_: usize, _: usize| {}
    }

    #[test]
    fn test_three_filters_keep_bare_model_only() {
        let service = bare_and_busy();
        let search = ModelSearch::new(&service, SearchOptions::default());
        let filter = ModelFilter {
            no_hierarchy_definitions: true,
            no_properties: true,
            no_assets: true,
            ..Default::default()
        };

        let analyses = search.analyze(&filter, &mut ignore_progress()).unwrap();
        let a = &analyses[0];
        assert_eq!(a.model.id, "a");
        assert_eq!(filter.filter_match_count(&a.attributes), 3);
        assert_eq!(filter.active_filter_count(), 3);

        let b = &analyses[1];
        assert_eq!(b.attributes.hierarchy_definition_count, 2);
        assert_eq!(b.attributes.property_count, 3);
        assert_eq!(b.attributes.has_assets, Some(true));
        assert_eq!(filter.filter_match_count(&b.attributes), 0);

        let models = search.run(&filter, &mut ignore_progress()).unwrap();
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_only_bare_model_of_pair_exported() {
        let mut service = InMemorySiteWise::new();
        service.add_model(AssetModelDescription::new("a", "A"));
        service.add_model(
            AssetModelDescription::new("b", "B")
                .with_hierarchy("b1", "First", "x")
                .with_hierarchy("b2", "Second", "y")
                .with_property(AssetModelProperty::measurement("p1", "One"))
                .with_property(AssetModelProperty::measurement("p2", "Two"))
                .with_property(AssetModelProperty::measurement("p3", "Three")),
        );
        service.add_model_asset("b", AssetSummary::new("b-asset", "B Asset"));
        let search = ModelSearch::new(&service, SearchOptions::default());
        let filter = ModelFilter {
            no_hierarchy_definitions: true,
            no_properties: true,
            no_assets: true,
            ..Default::default()
        };

        let analyses = search.analyze(&filter, &mut ignore_progress()).unwrap();
        assert_eq!(filter.filter_match_count(&analyses[0].attributes), 3);
        assert_eq!(filter.active_filter_count(), 3);

        let models = search.run(&filter, &mut ignore_progress()).unwrap();
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_referenced_models_excluded() {
        let service = bare_and_busy();
        let search = ModelSearch::new(&service, SearchOptions::default());
        let filter = ModelFilter {
            no_hierarchy_references: true,
            ..Default::default()
        };

        let models = search.run(&filter, &mut ignore_progress()).unwrap();

        // A and C are hierarchy children of B
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_no_filters_return_everything_without_asset_listing() {
        let service = reference_chain();
        let search = ModelSearch::new(&service, SearchOptions::default());

        let models = search
            .run(&ModelFilter::default(), &mut ignore_progress())
            .unwrap();

        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Pump", "Line", "Plant", "Orphan"]);
        assert_eq!(
            service.count_calls(|c| matches!(c, ApiCall::ListAssets(_))),
            0
        );
    }

    #[test]
    fn test_asset_listing_only_checks_first_page() {
        let service = reference_chain();
        let search = ModelSearch::new(&service, SearchOptions::default());
        let filter = ModelFilter {
            no_assets: true,
            ..Default::default()
        };

        let models = search.run(&filter, &mut ignore_progress()).unwrap();

        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![PLANT_MODEL, ORPHAN_MODEL]);
        // one listing per model even though Pump has two pages of assets
        assert_eq!(
            service.count_calls(|c| matches!(c, ApiCall::ListAssets(_))),
            4
        );
    }

    #[test]
    fn test_progress_reported_per_model() {
        let service = reference_chain();
        let search = ModelSearch::new(&service, SearchOptions::default());
        let mut seen = Vec::new();

        search
            .run(&ModelFilter::default(), &mut |done: usize, total: usize| {
                seen.push((done, total))
            })
            .unwrap();

        assert_eq!(seen.len(), 4);
        assert_eq!(seen.first(), Some(&(1, 4)));
        assert_eq!(seen.last(), Some(&(4, 4)));
    }

    #[test]
    fn test_each_model_described_in_full_once() {
        let service = reference_chain();
        let search = ModelSearch::new(&service, SearchOptions::default());

        search
            .run(&ModelFilter::default(), &mut ignore_progress())
            .unwrap();

        let describes = service.count_calls(|c| {
            matches!(
                c,
                ApiCall::DescribeAssetModel {
                    exclude_properties: false,
                    ..
                }
            )
        });
        assert_eq!(describes, 4);
    }

    #[test]
    fn test_empty_catalogue() {
        let service = InMemorySiteWise::new();
        let search = ModelSearch::new(&service, SearchOptions::default());
        let mut calls = 0;

        let models = search
            .run(&ModelFilter::default(), &mut |_: usize, _: usize| calls += 1)
            .unwrap();

        assert!(models.is_empty());
        assert_eq!(calls, 0);
    }
}
