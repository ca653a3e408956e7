//! Content type resource.
//!
//! Content types are addressed at `/types` and describe the element layout
//! of content items. Elements are patched as a collection: added at the end,
//! replaced or removed by reference, or moved relative to another element.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::management::patch::{
    MovePosition, OperationKind, PatchOperation, PropertySchema, ResourceSchema, ValueKind,
};
use crate::management::reference::Reference;
use crate::management::resource::ManagementResource;
use crate::management::resources::ElementSchema;

/// Patchable properties of a content type.
pub const CONTENT_TYPE_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "ContentType",
    properties: &[
        PropertySchema::replace_only("name", ValueKind::Text),
        PropertySchema::replace_only("codename", ValueKind::Text),
        PropertySchema {
            name: "elements",
            operations: &[
                OperationKind::Add,
                OperationKind::Remove,
                OperationKind::Replace,
                OperationKind::Move,
            ],
            value: ValueKind::Element,
            collection: true,
        },
    ],
};

/// A group of elements shown together in the editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGroupModel {
    /// Internal identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Codename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// Caller-assigned external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// A content type as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeModel {
    /// Internal identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Codename.
    pub codename: String,
    /// Caller-assigned external identifier.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Time of the last change.
    pub last_modified: DateTime<Utc>,
    /// Content groups, if the type uses them.
    #[serde(default)]
    pub content_groups: Vec<ContentGroupModel>,
    /// Elements in editor order.
    #[serde(default)]
    pub elements: Vec<ElementSchema>,
}

impl ContentTypeModel {
    /// Finds an element by codename.
    #[must_use]
    pub fn element(&self, codename: &str) -> Option<&ElementSchema> {
        self.elements.iter().find(|e| e.codename() == Some(codename))
    }
}

/// Payload for creating a content type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentTypeCreateModel {
    /// Display name.
    pub name: String,
    /// Codename. Generated from the name when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// Caller-assigned external identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Content groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_groups: Vec<ContentGroupModel>,
    /// Elements in editor order.
    pub elements: Vec<ElementSchema>,
}

impl ContentTypeCreateModel {
    /// Creates a payload with a name and no elements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codename: None,
            external_id: None,
            content_groups: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Sets the codename.
    #[must_use]
    pub fn codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = Some(codename.into());
        self
    }

    /// Sets the external identifier.
    #[must_use]
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Appends an element.
    #[must_use]
    pub fn element(mut self, element: ElementSchema) -> Self {
        self.elements.push(element);
        self
    }
}

/// A typed content type patch.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentTypePatch {
    /// Renames the type.
    Name(String),
    /// Changes the codename.
    Codename(String),
    /// Appends an element.
    AddElement(ElementSchema),
    /// Replaces the referenced element.
    ReplaceElement {
        /// The element to replace.
        target: Reference,
        /// The new element definition.
        element: ElementSchema,
    },
    /// Removes the referenced element.
    RemoveElement(Reference),
    /// Moves the referenced element.
    MoveElement {
        /// The element to move.
        target: Reference,
        /// Where to place it.
        position: MovePosition,
    },
}

impl From<ContentTypePatch> for PatchOperation {
    fn from(patch: ContentTypePatch) -> Self {
        match patch {
            ContentTypePatch::Name(name) => Self::replace("name", name),
            ContentTypePatch::Codename(codename) => Self::replace("codename", codename),
            ContentTypePatch::AddElement(element) => Self::add("elements", element),
            ContentTypePatch::ReplaceElement { target, element } => {
                Self::replace("elements", element).with_target(target)
            }
            ContentTypePatch::RemoveElement(target) => Self::remove("elements", target),
            ContentTypePatch::MoveElement { target, position } => {
                Self::move_member("elements", target, position)
            }
        }
    }
}

impl ManagementResource for ContentTypeModel {
    type CreateModel = ContentTypeCreateModel;

    const NAME: &'static str = "ContentType";
    const ENDPOINT: &'static str = "types";
    const SCHEMA: ResourceSchema = CONTENT_TYPE_SCHEMA;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::patch::PatchDocument;
    use crate::management::resources::{ElementDefault, NumberElement, TextElement};
    use serde_json::json;

    #[test]
    fn test_content_type_deserializes_elements() {
        let content_type: ContentTypeModel = serde_json::from_value(json!({
            "id": "0be13600-e57c-577d-8108-c8d860330985",
            "name": "Article",
            "codename": "article",
            "last_modified": "2023-01-05T09:12:00Z",
            "elements": [
                {"type": "text", "name": "Title", "codename": "title",
                 "default": {"global": {"value": "Untitled"}}},
                {"type": "number", "name": "Rating", "codename": "rating"},
                {"type": "guidelines", "guidelines": "<p>Keep it short.</p>"}
            ]
        }))
        .unwrap();

        assert_eq!(content_type.elements.len(), 3);
        assert!(content_type.content_groups.is_empty());
        assert!(matches!(
            content_type.element("title"),
            Some(ElementSchema::Text(t)) if t.default.as_ref().map(|d| d.value().as_str()) == Some("Untitled")
        ));
        assert!(content_type.element("missing").is_none());
    }

    #[test]
    fn test_create_model_serializes_elements_in_order() {
        let model = ContentTypeCreateModel::new("Article")
            .codename("article")
            .element(ElementSchema::Text(TextElement::new("Title").codename("title")))
            .element(ElementSchema::Number(
                NumberElement::new("Rating").default_value(ElementDefault::new(3.0)),
            ));

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["elements"][0]["codename"], "title");
        assert_eq!(json["elements"][1]["default"]["global"]["value"], 3.0);
        assert!(json.get("content_groups").is_none());
    }

    #[test]
    fn test_content_type_patches_fit_the_schema() {
        let document = PatchDocument::build(
            &CONTENT_TYPE_SCHEMA,
            [
                ContentTypePatch::Name("Blog post".to_string()),
                ContentTypePatch::AddElement(ElementSchema::Text(TextElement::new("Summary"))),
                ContentTypePatch::ReplaceElement {
                    target: Reference::by_codename("title"),
                    element: ElementSchema::Text(TextElement::new("Headline").codename("title")),
                },
                ContentTypePatch::MoveElement {
                    target: Reference::by_codename("summary"),
                    position: MovePosition::Before(Reference::by_codename("title")),
                },
                ContentTypePatch::RemoveElement(Reference::by_codename("rating")),
            ],
        )
        .unwrap();

        let json = document.to_json().unwrap();
        assert_eq!(json[2]["path"], "/elements/codename:title");
        assert_eq!(json[3]["before"], json!({"codename": "title"}));
        assert_eq!(json[4], json!({"op": "remove", "path": "/elements/codename:rating"}));
    }

    #[test]
    fn test_elements_reject_element_value_of_wrong_shape() {
        let result = PatchDocument::build(
            &CONTENT_TYPE_SCHEMA,
            [PatchOperation::add("elements", "title")],
        );
        assert!(result.is_err());
    }
}
