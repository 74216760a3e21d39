//! End-to-end tests wiring configuration, clients, serializers and resource
//! APIs together.

use std::sync::Arc;

use futures::TryStreamExt;
use google_api_toolkit::rest::{ResourceDescriptor, ResourceOperation, ResourcePath};
use google_api_toolkit::serializers::{DictSerializer, ModelSerializer, Serializer};
use google_api_toolkit::{
    ApiConfig, BaseUrl, ConfigError, HttpMethod, RequestBuilder, ResourceApi, ResourceError,
    RestApi, RestClient,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEMBERS: ResourceDescriptor = ResourceDescriptor::new(
    "Member",
    &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &["parent"],
            "{+parent}/members",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["parent", "name"],
            "{+parent}/members/{name}",
        ),
    ],
)
.items_key("members");

fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig::builder()
        .base_url(BaseUrl::new(format!("{}/v1/", server.uri())).unwrap())
        .page_size(2)
        .num_retries(0)
        .build()
        .unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_requires_base_url() {
    let result = ApiConfig::builder().build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "base_url" })
    ));
}

#[test]
fn test_config_rejects_zero_page_size_and_bad_urls() {
    let result = ApiConfig::builder()
        .base_url(BaseUrl::new("https://people.googleapis.com/v1").unwrap())
        .page_size(0)
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidPageSize { size: 0 })));

    assert!(matches!(
        BaseUrl::new("people.googleapis.com"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

// ============================================================================
// Untyped resource APIs
// ============================================================================

#[tokio::test]
async fn test_dict_api_lists_with_path_params_and_streams_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/eng/members"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [{"id": "c"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/eng/members"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [{"id": "a"}, {"id": "b", "role": null}],
            "nextPageToken": "p2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = RestClient::new(&config).unwrap();
    let members = ResourceApi::<Map<String, Value>>::new(
        client,
        &config,
        MEMBERS,
        Arc::new(DictSerializer),
    )
    .with_path_param("parent", "groups/eng");

    let ids: Vec<Value> = members
        .iterate(None, None)
        .await
        .unwrap()
        .into_stream()
        .map_ok(|member| member["id"].clone())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
}

#[tokio::test]
async fn test_simple_placeholders_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/eng/members/ada%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ada@example.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = RestClient::new(&config).unwrap();
    let members = ResourceApi::<Map<String, Value>>::new(
        client,
        &config,
        MEMBERS,
        Arc::new(DictSerializer),
    )
    .with_path_param("parent", "groups/eng");

    let member = members.get("ada@example.com").await.unwrap();
    assert_eq!(member.get("id"), Some(&json!("ada@example.com")));
}

#[tokio::test]
async fn test_unsupported_operation_fails_before_sending() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let client = RestClient::new(&config).unwrap();
    let members =
        ResourceApi::<Map<String, Value>>::new(client, &config, MEMBERS, Arc::new(DictSerializer));

    let error = members.delete("groups/eng/members/a").await.unwrap_err();
    assert!(matches!(
        error,
        ResourceError::PathResolutionFailed {
            resource: "Member",
            operation: "delete"
        }
    ));

    // A list without its parent cannot resolve either.
    assert!(members.list(None, None).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Typed models and prepared requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Member {
    id: String,
    role: Option<String>,
}

#[tokio::test]
async fn test_prepared_request_can_be_executed_twice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/eng/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [{"id": "a", "role": "OWNER"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = RestClient::new(&config).unwrap();
    let builder =
        RequestBuilder::<Member>::new(client, MEMBERS, Arc::new(ModelSerializer::<Member>::new()))
            .path_param("parent", "groups/eng");

    let request = builder.list(None, None).unwrap();
    let first = request.execute().await.unwrap();
    let second = request.execute().await.unwrap();

    assert_eq!(first.items(), second.items());
    assert_eq!(first[0].role.as_deref(), Some("OWNER"));
}

#[tokio::test]
async fn test_malformed_item_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/groups/eng/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [{"role": "OWNER"}]
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = RestClient::new(&config).unwrap();
    let members = ResourceApi::<Member>::new(
        client,
        &config,
        MEMBERS,
        Arc::new(ModelSerializer::<Member>::new()),
    )
    .with_path_param("parent", "groups/eng");

    let error = members.list(None, None).await.unwrap_err();
    assert!(matches!(error, ResourceError::Serialization(_)));
}

#[test]
fn test_model_serializer_round_trips_through_text() {
    let serializer = ModelSerializer::<Member>::new();
    let member = Member {
        id: "a".to_string(),
        role: None,
    };

    let text = serializer.dumps(&member).unwrap();
    assert_eq!(text, r#"{"id":"a"}"#);
    assert_eq!(serializer.loads(&text).unwrap(), member);
}
