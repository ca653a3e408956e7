//! Asset resource.
//!
//! Assets are addressed at `/assets`. Creating an asset links metadata to a
//! file that was already uploaded; the returned file reference is passed in
//! [`AssetCreateModel::file_reference`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::management::patch::{PatchOperation, PropertySchema, ResourceSchema, ValueKind};
use crate::management::reference::Reference;
use crate::management::resource::ManagementResource;
use crate::management::resources::IdReference;

/// Patchable properties of an asset.
pub const ASSET_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "Asset",
    properties: &[
        PropertySchema::replace_only("title", ValueKind::Text),
        PropertySchema::replace_only("codename", ValueKind::Text),
        PropertySchema::replace_only("folder", ValueKind::Reference),
    ],
};

/// Reference to an uploaded binary file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Identifier of the uploaded file.
    pub id: Uuid,
    /// Storage kind. Always `internal` for files uploaded to the service.
    #[serde(rename = "type", default = "internal_kind")]
    pub kind: String,
}

fn internal_kind() -> String {
    "internal".to_string()
}

impl FileReference {
    /// References a file uploaded to the service.
    #[must_use]
    pub fn internal(id: Uuid) -> Self {
        Self {
            id,
            kind: internal_kind(),
        }
    }
}

/// Alternative text of an asset for one language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescription {
    /// The language the description is written in.
    pub language: Reference,
    /// The description, if any.
    #[serde(default)]
    pub description: Option<String>,
}

/// An asset as returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetModel {
    /// Internal identifier.
    pub id: Uuid,
    /// Codename.
    #[serde(default)]
    pub codename: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// File size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Image width in pixels, for images.
    #[serde(default)]
    pub image_width: Option<u32>,
    /// Image height in pixels, for images.
    #[serde(default)]
    pub image_height: Option<u32>,
    /// The underlying file.
    pub file_reference: FileReference,
    /// The folder the asset is filed in.
    #[serde(default)]
    pub folder: Option<IdReference>,
    /// Caller-assigned external identifier.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Per-language descriptions.
    #[serde(default)]
    pub descriptions: Vec<AssetDescription>,
    /// Public delivery URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Time of the last change.
    pub last_modified: DateTime<Utc>,
}

/// Payload for creating an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetCreateModel {
    /// The uploaded file.
    pub file_reference: FileReference,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Codename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// Target folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<Reference>,
    /// Caller-assigned external identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Per-language descriptions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<AssetDescription>,
}

impl AssetCreateModel {
    /// Creates a payload for an uploaded file.
    #[must_use]
    pub const fn new(file_reference: FileReference) -> Self {
        Self {
            file_reference,
            title: None,
            codename: None,
            folder: None,
            external_id: None,
            descriptions: Vec::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the codename.
    #[must_use]
    pub fn codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = Some(codename.into());
        self
    }

    /// Files the asset into a folder.
    #[must_use]
    pub fn folder(mut self, folder: Reference) -> Self {
        self.folder = Some(folder);
        self
    }

    /// Adds a description for a language.
    #[must_use]
    pub fn description(mut self, language: Reference, description: impl Into<String>) -> Self {
        self.descriptions.push(AssetDescription {
            language,
            description: Some(description.into()),
        });
        self
    }
}

/// A typed asset patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetPatch {
    /// Changes the title.
    Title(String),
    /// Changes the codename.
    Codename(String),
    /// Moves the asset to another folder.
    Folder(Reference),
}

impl From<AssetPatch> for PatchOperation {
    fn from(patch: AssetPatch) -> Self {
        match patch {
            AssetPatch::Title(title) => Self::replace("title", title),
            AssetPatch::Codename(codename) => Self::replace("codename", codename),
            AssetPatch::Folder(folder) => Self::replace("folder", folder),
        }
    }
}

impl ManagementResource for AssetModel {
    type CreateModel = AssetCreateModel;

    const NAME: &'static str = "Asset";
    const ENDPOINT: &'static str = "assets";
    const SCHEMA: ResourceSchema = ASSET_SCHEMA;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::patch::PatchDocument;
    use serde_json::json;

    #[test]
    fn test_asset_deserializes_image_metadata() {
        let asset: AssetModel = serde_json::from_value(json!({
            "id": "fcbb12e6-66a3-4672-85d9-d502d16b8d9c",
            "codename": "hero",
            "file_name": "hero.png",
            "title": "Hero",
            "size": 34025,
            "type": "image/png",
            "image_width": 1200,
            "image_height": 630,
            "file_reference": {"id": "806ec84e-7c71-4856-9519-ee3dd3558583", "type": "internal"},
            "descriptions": [
                {"language": {"id": "00000000-0000-0000-0000-000000000000"}, "description": "A hero image"}
            ],
            "last_modified": "2023-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.image_width, Some(1200));
        assert_eq!(asset.file_reference.kind, "internal");
        assert_eq!(asset.descriptions[0].language, Reference::ById(Uuid::nil()));
        assert!(asset.folder.is_none());
    }

    #[test]
    fn test_create_model_serialization() {
        let model = AssetCreateModel::new(FileReference::internal(Uuid::nil()))
            .title("Logo")
            .folder(Reference::by_external_id("brand"))
            .description(Reference::by_codename("en-US"), "Company logo");

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "file_reference": {"id": "00000000-0000-0000-0000-000000000000", "type": "internal"},
                "title": "Logo",
                "folder": {"external_id": "brand"},
                "descriptions": [{"language": {"codename": "en-US"}, "description": "Company logo"}]
            })
        );
    }

    #[test]
    fn test_asset_patches_fit_the_schema() {
        let document = PatchDocument::build(
            &ASSET_SCHEMA,
            [
                AssetPatch::Title("Logo (dark)".to_string()),
                AssetPatch::Folder(Reference::by_codename("brand")),
            ],
        )
        .unwrap();
        assert_eq!(document.len(), 2);

        let result = PatchDocument::build(&ASSET_SCHEMA, [PatchOperation::replace("size", "1")]);
        assert!(result.is_err());
    }
}
