//! Integration tests for symbolic call dispatch.
//!
//! A recording transport captures every request so the tests can assert both
//! what was sent and that nothing was sent when resolution fails.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use shopify_endpoints::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use shopify_endpoints::{
    AccessToken, Action, CallArg, CallDispatcher, DispatchError, EndpointError, ResourceGraph,
    Session, ShopDomain, ShopifyConfig,
};

/// Transport that records requests and answers with a fixed response.
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    code: u16,
    headers: HashMap<String, Vec<String>>,
    body: String,
}

impl RecordingTransport {
    fn responding(code: u16, body: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            code,
            headers: HashMap::new(),
            body: body.to_string(),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse::new(
            self.code,
            self.headers.clone(),
            self.body.clone(),
        ))
    }
}

fn create_test_session(shop: &str, access_token: &str) -> Session {
    Session::new(
        ShopDomain::new(shop).unwrap(),
        AccessToken::new(access_token).unwrap(),
        "write_products,read_orders".parse().unwrap(),
        None,
    )
}

fn dispatcher(transport: &RecordingTransport) -> CallDispatcher<Session, &RecordingTransport> {
    CallDispatcher::with_transport(
        ShopifyConfig::default(),
        create_test_session("test-shop", "shpat_test"),
        Arc::new(ResourceGraph::shopify_default().unwrap()),
        transport,
    )
}

// ============================================================================
// Successful Dispatch
// ============================================================================

#[tokio::test]
async fn test_create_product_posts_enveloped_body() {
    let transport = RecordingTransport::responding(201, r#"{"product": {"id": 1, "title": "T"}}"#);
    let mut shopify = dispatcher(&transport);

    let response = shopify
        .invoke_json("createProduct", vec![json!({"product": {"title": "T"}})])
        .await
        .unwrap();
    assert_eq!(response["product"]["id"], 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(
        request.url,
        "https://test-shop.myshopify.com/admin/api/2025-10/products.json"
    );
    assert_eq!(request.body, Some(json!({"product": {"title": "T"}})));
    assert_eq!(request.header("X-Shopify-Access-Token"), Some("shpat_test"));
}

#[tokio::test]
async fn test_get_products_with_query() {
    let transport = RecordingTransport::responding(200, r#"{"products": []}"#);
    let mut shopify = dispatcher(&transport);

    let resolved = shopify
        .prepare(
            "getProducts",
            CallArg::from_json_args(vec![json!({"since_id": 100})]).unwrap(),
        )
        .unwrap();
    assert_eq!(resolved.action, Action::Get);
    assert_eq!(resolved.path_and_query(), "/products?since_id=100");
    assert_eq!(resolved.body, None);

    shopify
        .invoke_json("getProducts", vec![json!({"since_id": 100})])
        .await
        .unwrap();
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].http_method, HttpMethod::Get);
    assert!(requests[0].url.ends_with("/products.json?since_id=100"));
    assert_eq!(requests[0].body, None);
    assert_eq!(requests[0].header("Content-Type"), None);
}

#[tokio::test]
async fn test_tiered_identifiers_and_verbs() {
    let transport = RecordingTransport::responding(200, "{}");
    let mut shopify = dispatcher(&transport);

    shopify
        .invoke("getOrdersFulfillmentsEvents", vec![1_u64.into(), 2_u64.into(), 3_u64.into()])
        .await
        .unwrap();
    shopify
        .invoke(
            "modifyProductVariant",
            vec![
                10_u64.into(),
                20_u64.into(),
                CallArg::from_json(json!({"variant": {"price": "9.99"}})).unwrap(),
            ],
        )
        .await
        .unwrap();
    shopify
        .invoke("deleteProductImage", vec![10_u64.into(), 30_u64.into()])
        .await
        .unwrap();

    let requests = transport.requests();
    let summary: Vec<(HttpMethod, &str)> = requests
        .iter()
        .map(|r| {
            let path = r
                .url
                .trim_start_matches("https://test-shop.myshopify.com/admin/api/2025-10");
            (r.http_method, path)
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (HttpMethod::Get, "/orders/1/fulfillments/2/events/3.json"),
            (HttpMethod::Put, "/products/10/variants/20.json"),
            (HttpMethod::Delete, "/products/10/images/30.json"),
        ]
    );
    assert_eq!(requests[1].body, Some(json!({"variant": {"price": "9.99"}})));
}

#[tokio::test]
async fn test_empty_response_body_decodes_to_empty_object() {
    let transport = RecordingTransport::responding(200, "");
    let mut shopify = dispatcher(&transport);

    let response = shopify
        .invoke("deleteScriptTag", vec![596_726_825_u64.into()])
        .await
        .unwrap();
    assert_eq!(response, json!({}));
}

#[test]
fn test_invoke_with_block_on() {
    let transport = RecordingTransport::responding(200, r#"{"count": 2}"#);
    let mut shopify = dispatcher(&transport);

    let response: Value =
        tokio_test::block_on(shopify.invoke("getProductsCount", vec![])).unwrap();
    assert_eq!(response["count"], 2);
    assert!(transport.requests()[0].url.ends_with("/products/count.json"));
}

// ============================================================================
// Failures Before I/O
// ============================================================================

#[tokio::test]
async fn test_missing_body_sends_nothing() {
    let transport = RecordingTransport::responding(200, "{}");
    let mut shopify = dispatcher(&transport);

    let error = shopify.invoke("createProduct", vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::MissingBody { ref key, action: Action::Create } if key == "products"
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_resolution_errors_send_nothing() {
    let transport = RecordingTransport::responding(200, "{}");
    let mut shopify = dispatcher(&transport);

    let error = shopify.invoke("fetchProducts", vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Endpoint(EndpointError::Parse { .. })
    ));

    let error = shopify.invoke("getCustomers", vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Endpoint(EndpointError::UnknownResource { .. })
    ));

    let error = shopify.invoke("getProductImages", vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Endpoint(EndpointError::InvalidEndpoint { .. })
    ));

    let error = shopify
        .invoke_json("getProducts", vec![json!(1), json!(2), json!(3), json!(4)])
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Endpoint(EndpointError::InvalidEndpoint { .. })
    ));

    let error = shopify
        .invoke_json("getProducts", vec![json!([1, 2])])
        .await
        .unwrap_err();
    assert!(matches!(error, DispatchError::InvalidArgument { index: 0, .. }));

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_expired_session_sends_nothing() {
    let transport = RecordingTransport::responding(200, "{}");
    let session = Session::new(
        ShopDomain::new("test-shop").unwrap(),
        AccessToken::new("shpat_test").unwrap(),
        "read_products".parse().unwrap(),
        Some(Utc::now() - Duration::hours(1)),
    );
    let mut shopify = CallDispatcher::with_transport(
        ShopifyConfig::default(),
        session,
        Arc::new(ResourceGraph::shopify_default().unwrap()),
        &transport,
    );

    let error = shopify.invoke("getProducts", vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Unauthenticated { ref shop } if shop == "test-shop.myshopify.com"
    ));
    let error = shopify.fetch_shop().await.unwrap_err();
    assert!(matches!(error, DispatchError::Unauthenticated { .. }));
    assert!(transport.requests().is_empty());
}

// ============================================================================
// Response Handling
// ============================================================================

#[tokio::test]
async fn test_non_2xx_maps_to_response_error() {
    let mut transport = RecordingTransport::responding(404, r#"{"errors": "Not Found"}"#);
    transport
        .headers
        .insert("x-request-id".to_string(), vec!["req-123".to_string()]);
    let mut shopify = dispatcher(&transport);

    let error = shopify
        .invoke("getProductsById", vec![999_u64.into()])
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(404));
    match error {
        DispatchError::Http(HttpError::Response(response)) => {
            assert!(response.message.contains("Not Found"));
            assert_eq!(response.error_reference.as_deref(), Some("req-123"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let transport = RecordingTransport::responding(200, "<html>");
    let mut shopify = dispatcher(&transport);

    let error = shopify.invoke("getProducts", vec![]).await.unwrap_err();
    assert!(matches!(error, DispatchError::Decode(_)));
}

#[tokio::test]
async fn test_get_raw_and_fetch_shop() {
    let transport = RecordingTransport::responding(200, r#"{"shop": {"name": "Test Shop"}}"#);
    let shopify = dispatcher(&transport);

    let shop = shopify.fetch_shop().await.unwrap();
    assert_eq!(shop, json!({"name": "Test Shop"}));

    let query = json!({"fields": "name"});
    shopify
        .get_raw("/shop.json", query.as_object())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        "https://test-shop.myshopify.com/admin/api/2025-10/shop.json"
    );
    assert_eq!(
        requests[1].url,
        "https://test-shop.myshopify.com/admin/api/2025-10/shop.json?fields=name"
    );
}

#[tokio::test]
async fn test_fetch_shop_requires_shop_object() {
    let transport = RecordingTransport::responding(200, r#"{"errors": "none"}"#);
    let shopify = dispatcher(&transport);

    let error = shopify.fetch_shop().await.unwrap_err();
    assert!(matches!(error, DispatchError::Decode(_)));
}
