//! Integration tests for endpoint resolution.
//!
//! These tests exercise the resolver against the default graph and against
//! graphs loaded from JSON, without any network access.

use std::sync::Arc;

use shopify_endpoints::{
    Action, ConfigError, EndpointError, EndpointResolver, InvalidEndpointReason, KeywordMatching,
    NameParser, ResourceGraph, Suffix,
};

fn default_resolver() -> EndpointResolver {
    EndpointResolver::new(Arc::new(ResourceGraph::shopify_default().unwrap()))
}

fn snake(key: &str) -> String {
    let mut out = String::new();
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Tier-1 Properties
// ============================================================================

#[test]
fn test_every_resource_all_is_its_underscored_path() {
    let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
    let mut resolver = EndpointResolver::new(Arc::clone(&graph));

    for (key, _) in graph.resources() {
        let category = resolver.resolve_tier_one(key, None).unwrap();
        assert_eq!(category.all(), format!("/{}", snake(key)));
        assert!(!category.all().ends_with(char::is_numeric));
    }
}

#[test]
fn test_every_resource_by_id_is_all_plus_id() {
    let graph = Arc::new(ResourceGraph::shopify_default().unwrap());

    for (key, _) in graph.resources() {
        let mut resolver = EndpointResolver::new(Arc::clone(&graph));
        let all = resolver.resolve_tier_one(key, None).unwrap().all().to_string();
        let by_id = resolver
            .resolve_tier_one(key, Some(632_910_392))
            .unwrap()
            .by_id()
            .map(str::to_string);
        assert_eq!(by_id, Some(format!("{all}/632910392")));
    }
}

#[test]
fn test_repeated_resolution_returns_identical_category() {
    let mut resolver = default_resolver();
    resolver.resolve_tier_one("orders", Some(1)).unwrap();

    let first = resolver
        .resolve_tier_two("ordersTransactions", Some(9), None)
        .unwrap()
        .clone();
    let cached = resolver.cached_categories();
    let second = resolver
        .resolve_tier_two("ordersTransactions", Some(9), None)
        .unwrap()
        .clone();

    assert_eq!(first, second);
    assert_eq!(resolver.cached_categories(), cached);
}

// ============================================================================
// Tier-2 and Tier-3
// ============================================================================

#[test]
fn test_tier_two_before_tier_one_fails() {
    let mut resolver = default_resolver();
    let error = resolver
        .resolve_tier_two("blogsArticles", Some(3), None)
        .unwrap_err();

    match error {
        EndpointError::InvalidEndpoint { key, action, reason } => {
            assert_eq!(key, "blogsArticles");
            assert_eq!(action, Action::Get);
            assert_eq!(
                reason,
                InvalidEndpointReason::ParentNotResolved {
                    parent: "blogs".to_string()
                }
            );
        }
        other => panic!("expected InvalidEndpoint, got {other:?}"),
    }
}

#[test]
fn test_tier_three_orders_fulfillments_events() {
    let mut resolver = default_resolver();
    let uri = resolver
        .resolve(Action::Get, "ordersFulfillmentsEvents", &[1, 2, 3])
        .unwrap();
    assert_eq!(uri, "/orders/1/fulfillments/2/events/3");

    let count = resolver
        .resolve(Action::Get, "orderFulfillmentEventsCount", &[1, 2])
        .unwrap();
    assert_eq!(count, "/orders/1/fulfillments/2/events/count");

    assert!(resolver.category("ordersFulfillments").is_some());
    assert!(resolver.category("ordersFulfillmentsEvents").is_some());
}

#[test]
fn test_parsed_name_feeds_resolution() {
    let parsed = NameParser::default().parse("getProductImagesById").unwrap();
    assert_eq!(parsed.action, Action::Get);
    assert_eq!(parsed.resource_path, "productImages");
    assert_eq!(parsed.suffix, Some(Suffix::ById));

    let mut resolver = default_resolver();
    let uri = resolver
        .resolve(parsed.action, &parsed.endpoint_key, &[123, 456])
        .unwrap();
    assert_eq!(uri, "/products/123/images/456");
}

#[test]
fn test_theme_assets_modify_without_asset_id() {
    let mut resolver = default_resolver();
    assert_eq!(
        resolver.resolve(Action::Modify, "themesAssets", &[828_155_753]).unwrap(),
        "/themes/828155753/assets"
    );
    assert_eq!(
        resolver.resolve(Action::Get, "themesAssets", &[828_155_753]).unwrap(),
        "/themes/828155753/assets"
    );
}

#[test]
fn test_unknown_resource() {
    let mut resolver = default_resolver();
    let error = resolver.resolve(Action::Get, "customersAll", &[]).unwrap_err();
    assert!(matches!(
        error,
        EndpointError::UnknownResource { ref key, action: Action::Get } if key == "customers"
    ));
}

// ============================================================================
// Custom Graphs
// ============================================================================

#[test]
fn test_custom_graph_from_json() {
    let graph = ResourceGraph::from_json(
        r#"{
            "resources": {
                "customers": ["addresses", "metafields"],
                "priceRules": { "nested": ["discountCodes"], "tier3": [] }
            },
            "noIdentifierResources": []
        }"#,
    )
    .unwrap();
    let mut resolver = EndpointResolver::new(Arc::new(graph));

    assert_eq!(
        resolver.resolve(Action::Get, "customerAddresses", &[5]).unwrap(),
        "/customers/5/addresses"
    );
    assert_eq!(
        resolver.resolve(Action::Create, "priceRuleDiscountCodes", &[7]).unwrap(),
        "/price_rules/7/discount_codes"
    );
}

#[test]
fn test_graph_validation_errors() {
    let duplicate = ResourceGraph::from_json(r#"{"resources": {"a": [], "a": []}}"#);
    assert!(matches!(duplicate, Err(ConfigError::DuplicateResource { .. })));

    let orphan = ResourceGraph::from_json(
        r#"{"resources": {"orders": {"nested": [], "tier3": ["events"]}}}"#,
    );
    assert!(matches!(orphan, Err(ConfigError::OrphanTierThree { .. })));

    let malformed = ResourceGraph::from_json("not json");
    assert!(matches!(malformed, Err(ConfigError::InvalidResourceGraph { .. })));
}

#[test]
fn test_substring_matching_accepts_keywords_anywhere() {
    let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
    let mut resolver = EndpointResolver::with_matching(graph, KeywordMatching::Substring);
    let parser = NameParser::new(KeywordMatching::Substring);

    let parsed = parser.parse("getAllProducts").unwrap();
    assert_eq!(parsed.action, Action::Get);
    assert_eq!(parsed.endpoint_key, "allProducts");

    // the key "products" never occurs in "allProducts"
    let error = resolver
        .resolve(parsed.action, &parsed.endpoint_key, &[])
        .unwrap_err();
    assert!(matches!(error, EndpointError::UnknownResource { .. }));

    // "products" is found inside "myproducts", leaving "my" as a nested key
    let error = resolver
        .resolve(Action::Get, "myproductsCount", &[])
        .unwrap_err();
    assert!(matches!(error, EndpointError::InvalidEndpoint { .. }));
}
