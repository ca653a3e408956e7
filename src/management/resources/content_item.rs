//! Content item resource.
//!
//! Content items are addressed at `/items`. Only item metadata is managed
//! here; language variants carry the element values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::management::patch::{PatchOperation, PropertySchema, ResourceSchema, ValueKind};
use crate::management::reference::Reference;
use crate::management::resource::ManagementResource;
use crate::management::resources::IdReference;

/// Patchable properties of a content item.
pub const CONTENT_ITEM_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "ContentItem",
    properties: &[
        PropertySchema::replace_only("name", ValueKind::Text),
        PropertySchema::replace_only("codename", ValueKind::Text),
        PropertySchema::replace_only("collection", ValueKind::Reference),
    ],
};

/// A content item as returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItemModel {
    /// Internal identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Codename.
    pub codename: String,
    /// The item's content type.
    #[serde(rename = "type")]
    pub content_type: IdReference,
    /// The collection the item belongs to.
    #[serde(default)]
    pub collection: Option<IdReference>,
    /// Caller-assigned external identifier.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Time of the last change.
    pub last_modified: DateTime<Utc>,
}

/// Payload for creating a content item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentItemCreateModel {
    /// Display name.
    pub name: String,
    /// Codename. Generated from the name when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// The item's content type.
    #[serde(rename = "type")]
    pub content_type: Reference,
    /// Target collection. The service uses the default collection when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Reference>,
    /// Caller-assigned external identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl ContentItemCreateModel {
    /// Creates a payload for an item of `content_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: Reference) -> Self {
        Self {
            name: name.into(),
            codename: None,
            content_type,
            collection: None,
            external_id: None,
        }
    }

    /// Sets the codename.
    #[must_use]
    pub fn codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = Some(codename.into());
        self
    }

    /// Places the item into a collection.
    #[must_use]
    pub fn collection(mut self, collection: Reference) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Sets the external identifier.
    #[must_use]
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }
}

/// A typed content item patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentItemPatch {
    /// Renames the item.
    Name(String),
    /// Changes the codename.
    Codename(String),
    /// Moves the item to another collection.
    Collection(Reference),
}

impl From<ContentItemPatch> for PatchOperation {
    fn from(patch: ContentItemPatch) -> Self {
        match patch {
            ContentItemPatch::Name(name) => Self::replace("name", name),
            ContentItemPatch::Codename(codename) => Self::replace("codename", codename),
            ContentItemPatch::Collection(collection) => Self::replace("collection", collection),
        }
    }
}

impl ManagementResource for ContentItemModel {
    type CreateModel = ContentItemCreateModel;

    const NAME: &'static str = "ContentItem";
    const ENDPOINT: &'static str = "items";
    const SCHEMA: ResourceSchema = CONTENT_ITEM_SCHEMA;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::patch::PatchDocument;
    use serde_json::json;

    #[test]
    fn test_content_item_reads_type_and_collection() {
        let item: ContentItemModel = serde_json::from_value(json!({
            "id": "335d17ac-b6ba-4c6a-ae31-23c1193215cb",
            "name": "On Roasts",
            "codename": "on_roasts",
            "type": {"id": "0be13600-e57c-577d-8108-c8d860330985"},
            "collection": {"id": "00000000-0000-0000-0000-000000000000"},
            "external_id": "roasts",
            "last_modified": "2023-02-14T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(item.codename, "on_roasts");
        assert_eq!(
            item.content_type.id.to_string(),
            "0be13600-e57c-577d-8108-c8d860330985"
        );
        assert_eq!(item.collection.unwrap().id, Uuid::nil());
    }

    #[test]
    fn test_create_model_uses_type_key() {
        let model = ContentItemCreateModel::new("On Roasts", Reference::by_codename("article"))
            .collection(Reference::by_codename("default"));

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "name": "On Roasts",
                "type": {"codename": "article"},
                "collection": {"codename": "default"}
            })
        );
    }

    #[test]
    fn test_collection_patch_requires_reference_value() {
        let result = PatchDocument::build(
            &CONTENT_ITEM_SCHEMA,
            [PatchOperation::replace("collection", "default")],
        );
        assert!(result.is_err());

        let document = PatchDocument::build(
            &CONTENT_ITEM_SCHEMA,
            [ContentItemPatch::Collection(Reference::by_codename("default"))],
        )
        .unwrap();
        assert_eq!(
            document.to_json().unwrap(),
            json!([{"op": "replace", "path": "/collection", "value": {"codename": "default"}}])
        );
    }
}
