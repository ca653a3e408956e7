//! Integration tests for content types, content items and assets.
//!
//! These tests verify that every resource family shares the same request
//! shapes: endpoint paths, reference segments, patch bodies and listings.

use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use kontent_management::resources::{
    AssetCreateModel, AssetModel, AssetPatch, ContentItemCreateModel, ContentItemPatch,
    ContentTypeCreateModel, ContentTypePatch, DateTimeElement, ElementDefault, ElementSchema,
    FileReference, TextElement,
};
use kontent_management::{
    ApiKey, EndpointUrl, InvalidPatchOperationError, ManagementClient, ManagementConfig,
    ManagementError, MovePosition, PatchOperation, Reference,
};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE_PATH: &str = "/v2/projects/975bf280-fd91-488c-994c-2f04416e5ee3";

fn create_client(server: &MockServer) -> ManagementClient {
    let config = ManagementConfig::builder()
        .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse().unwrap())
        .api_key(ApiKey::new("test-api-key").unwrap())
        .endpoint(EndpointUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    ManagementClient::new(config).unwrap()
}

fn article_type() -> Value {
    json!({
        "id": "0be13600-e57c-577d-8108-c8d860330985",
        "name": "Article",
        "codename": "article",
        "last_modified": "2023-01-05T09:12:00Z",
        "elements": [
            {
                "type": "text",
                "id": "75c6ec1e-1f3a-4a84-8b7f-6b1a1c7f9d52",
                "name": "Title",
                "codename": "title",
                "is_required": true,
                "default": {"global": {"value": "Untitled"}}
            },
            {
                "type": "date_time",
                "id": "2b5b4e5c-8b38-4c1b-9a0a-2d42c4d4f7e1",
                "name": "Published",
                "codename": "published",
                "default": {"global": {"value": "2023-01-01T00:00:00Z"}}
            }
        ]
    })
}

fn content_item(codename: &str) -> Value {
    json!({
        "id": "335d17ac-b6ba-4c6a-ae31-23c1193215cb",
        "name": "On Roasts",
        "codename": codename,
        "type": {"id": "0be13600-e57c-577d-8108-c8d860330985"},
        "collection": {"id": "00000000-0000-0000-0000-000000000000"},
        "last_modified": "2023-02-14T08:00:00Z"
    })
}

fn asset(codename: &str, title: &str) -> Value {
    json!({
        "id": "fcbb12e6-66a3-4672-85d9-d502d16b8d9c",
        "codename": codename,
        "file_name": format!("{codename}.png"),
        "title": title,
        "size": 34025,
        "type": "image/png",
        "image_width": 1200,
        "image_height": 630,
        "file_reference": {"id": "806ec84e-7c71-4856-9519-ee3dd3558583", "type": "internal"},
        "descriptions": [],
        "last_modified": "2023-03-01T12:00:00Z"
    })
}

// ============================================================================
// Content Types
// ============================================================================

#[tokio::test]
async fn test_create_content_type_with_element_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{BASE_PATH}/types")))
        .and(body_json(json!({
            "name": "Article",
            "codename": "article",
            "elements": [
                {
                    "type": "text",
                    "codename": "title",
                    "name": "Title",
                    "is_required": true,
                    "default": {"global": {"value": "Untitled"}}
                },
                {
                    "type": "date_time",
                    "codename": "published",
                    "name": "Published",
                    "is_required": false,
                    "default": {"global": {"value": "2023-01-01T00:00:00Z"}}
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(article_type()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let model = ContentTypeCreateModel::new("Article")
        .codename("article")
        .element(ElementSchema::Text(
            TextElement::new("Title")
                .codename("title")
                .required()
                .default_value(ElementDefault::new("Untitled".to_string())),
        ))
        .element(ElementSchema::DateTime(
            DateTimeElement::new("Published")
                .codename("published")
                .default_value(ElementDefault::new(
                    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                )),
        ));

    let content_type = client.content_types().create(&model).await.unwrap();

    assert_eq!(content_type.codename, "article");
    assert_eq!(content_type.elements.len(), 2);
    match content_type.element("published") {
        Some(ElementSchema::DateTime(element)) => {
            let default = element.default.as_ref().unwrap();
            assert_eq!(
                *default.value(),
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
            );
        }
        other => panic!("Expected date_time element, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_modify_content_type_elements() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{BASE_PATH}/types/codename/article")))
        .and(body_json(json!([
            {
                "op": "add",
                "path": "/elements",
                "value": {"type": "text", "codename": "summary", "name": "Summary", "is_required": false}
            },
            {
                "op": "move",
                "path": "/elements/codename:summary",
                "before": {"codename": "title"}
            },
            {
                "op": "remove",
                "path": "/elements/codename:published"
            },
            {
                "op": "replace",
                "path": "/name",
                "value": "Blog post"
            }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_type()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let content_type = client
        .content_types()
        .modify(
            &Reference::by_codename("article"),
            [
                ContentTypePatch::AddElement(ElementSchema::Text(
                    TextElement::new("Summary").codename("summary"),
                )),
                ContentTypePatch::MoveElement {
                    target: Reference::by_codename("summary"),
                    position: MovePosition::Before(Reference::by_codename("title")),
                },
                ContentTypePatch::RemoveElement(Reference::by_codename("published")),
                ContentTypePatch::Name("Blog post".to_string()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(content_type.name, "Article");
}

#[tokio::test]
async fn test_get_content_type_with_unmodelled_elements() {
    let server = MockServer::start().await;
    let mut body = article_type();
    body["elements"]
        .as_array_mut()
        .unwrap()
        .extend([
            json!({
                "type": "taxonomy",
                "id": "f1cb6a4c-3a6a-4a9e-9d50-6e0b4d3a4e2b",
                "codename": "topics",
                "taxonomy_group": {"id": "7d7e7b0f-5b7e-4f0a-9c0e-4c4d6b2b1a10"}
            }),
            json!({
                "type": "url_slug",
                "codename": "slug",
                "name": "Slug",
                "depends_on": {"element": {"codename": "title"}}
            }),
        ]);
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/types/codename/article")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let content_type = client
        .content_types()
        .get(&Reference::by_codename("article"))
        .await
        .unwrap();

    assert_eq!(content_type.elements.len(), 4);
    assert!(matches!(content_type.element("title"), Some(ElementSchema::Text(_))));
    match content_type.element("topics") {
        Some(ElementSchema::Other(element)) => {
            assert_eq!(element.kind, "taxonomy");
            assert!(element.properties.contains_key("taxonomy_group"));
        }
        other => panic!("Expected taxonomy element, got: {other:?}"),
    }
    assert!(matches!(
        content_type.element("slug"),
        Some(ElementSchema::Other(element)) if element.kind == "url_slug"
    ));
}

#[tokio::test]
async fn test_content_type_patch_without_target_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_type()))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .content_types()
        .modify(
            &Reference::by_codename("article"),
            [PatchOperation::replace(
                "elements",
                ElementSchema::Text(TextElement::new("Headline")),
            )],
        )
        .await;

    assert!(matches!(
        result,
        Err(ManagementError::InvalidPatchOperation(
            InvalidPatchOperationError::MissingTarget { index: 0, .. }
        ))
    ));
}

// ============================================================================
// Content Items
// ============================================================================

#[tokio::test]
async fn test_content_item_lifecycle() {
    let server = MockServer::start().await;
    let item_path = format!("{BASE_PATH}/items/external-id/roasts");

    Mock::given(method("POST"))
        .and(path(format!("{BASE_PATH}/items")))
        .and(body_json(json!({
            "name": "On Roasts",
            "codename": "on_roasts",
            "type": {"codename": "article"},
            "external_id": "roasts"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(content_item("on_roasts")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(item_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_item("on_roasts")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(item_path.as_str()))
        .and(body_json(json!([
            {"op": "replace", "path": "/codename", "value": "roasting"},
            {"op": "replace", "path": "/collection", "value": {"codename": "coffee"}}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_item("roasting")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(item_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let items = client.content_items();
    let reference = Reference::by_external_id("roasts");

    let created = items
        .create(
            &ContentItemCreateModel::new("On Roasts", Reference::by_codename("article"))
                .codename("on_roasts")
                .external_id("roasts"),
        )
        .await
        .unwrap();
    assert_eq!(created.codename, "on_roasts");

    let fetched = items.get(&reference).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let modified = items
        .modify(
            &reference,
            [
                ContentItemPatch::Codename("roasting".to_string()),
                ContentItemPatch::Collection(Reference::by_codename("coffee")),
            ],
        )
        .await
        .unwrap();
    assert_eq!(modified.codename, "roasting");

    items.delete(&reference).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_content_item_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!(
            "{BASE_PATH}/items/00000000-0000-0000-0000-000000000000"
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "request_id": "req-404",
            "error_code": 100,
            "message": "The requested content item was not found."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .content_items()
        .delete(&Reference::by_id(Uuid::nil()))
        .await;

    assert!(matches!(
        result,
        Err(ManagementError::NotFound {
            resource: "ContentItem",
            ..
        })
    ));
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_create_and_modify_asset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{BASE_PATH}/assets")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "file_reference": {"id": "806ec84e-7c71-4856-9519-ee3dd3558583", "type": "internal"},
            "title": "Hero",
            "codename": "hero"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(asset("hero", "Hero")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{BASE_PATH}/assets/codename/hero")))
        .and(body_json(json!([
            {"op": "replace", "path": "/title", "value": "Hero (dark)"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset("hero", "Hero (dark)")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let file = FileReference::internal("806ec84e-7c71-4856-9519-ee3dd3558583".parse().unwrap());

    let created = client
        .assets()
        .create(&AssetCreateModel::new(file).title("Hero").codename("hero"))
        .await
        .unwrap();
    assert_eq!(created.mime_type, "image/png");

    let modified = client
        .assets()
        .modify(
            &Reference::by_codename("hero"),
            [AssetPatch::Title("Hero (dark)".to_string())],
        )
        .await
        .unwrap();
    assert_eq!(modified.title.as_deref(), Some("Hero (dark)"));
}

#[tokio::test]
async fn test_list_assets_as_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/assets")))
        .and(header("x-continuation", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [asset("footer", "Footer")],
            "pagination": {"continuation_token": null, "next_page": null}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/assets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [asset("hero", "Hero"), asset("logo", "Logo")],
            "pagination": {"continuation_token": "A1", "next_page": "https://example/next"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let assets: Vec<AssetModel> = client
        .assets()
        .list()
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    let codenames: Vec<_> = assets.iter().filter_map(|a| a.codename.as_deref()).collect();
    assert_eq!(codenames, vec!["hero", "logo", "footer"]);
}

#[tokio::test]
async fn test_empty_listing_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "pagination": {"continuation_token": null, "next_page": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let items = client.content_items().list().get_all().await.unwrap();
    assert!(items.is_empty());
}
