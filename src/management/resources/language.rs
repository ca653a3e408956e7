//! Language resource.
//!
//! Languages are addressed at `/languages`. Every environment has exactly one
//! default language, which cannot be deleted or deactivated by the service.
//!
//! # Example
//!
//! ```rust,ignore
//! use kontent_management::resources::{LanguageCreateModel, LanguagePatch};
//! use kontent_management::Reference;
//!
//! let german = client
//!     .languages()
//!     .create(
//!         &LanguageCreateModel::new("German", "de-DE")
//!             .fallback_language(Reference::by_codename("en-US")),
//!     )
//!     .await?;
//!
//! let renamed = client
//!     .languages()
//!     .modify(
//!         &Reference::by_id(german.id),
//!         [LanguagePatch::Name("Deutsch".to_string())],
//!     )
//!     .await?;
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::management::patch::{
    PatchOperation, PropertySchema, ResourceSchema, ValueKind,
};
use crate::management::reference::Reference;
use crate::management::resource::ManagementResource;
use crate::management::resources::IdReference;

/// Patchable properties of a language.
pub const LANGUAGE_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "Language",
    properties: &[
        PropertySchema::replace_only("name", ValueKind::Text),
        PropertySchema::replace_only("codename", ValueKind::Text),
        PropertySchema::replace_only("external_id", ValueKind::Text),
        PropertySchema::replace_only("is_active", ValueKind::Boolean),
        PropertySchema::replace_only("fallback_language", ValueKind::Reference),
    ],
};

/// A language as returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageModel {
    /// Internal identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Codename, usually a locale tag.
    pub codename: String,
    /// Caller-assigned external identifier.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Whether the language can be used for content.
    pub is_active: bool,
    /// Whether this is the environment's default language.
    pub is_default: bool,
    /// The language content falls back to when untranslated.
    #[serde(default)]
    pub fallback_language: Option<IdReference>,
}

/// Payload for creating a language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageCreateModel {
    /// Display name.
    pub name: String,
    /// Codename.
    pub codename: String,
    /// Whether the language is active. The service defaults to active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Fallback language. The service defaults to the default language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<Reference>,
    /// Caller-assigned external identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl LanguageCreateModel {
    /// Creates a payload with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codename: codename.into(),
            is_active: None,
            fallback_language: None,
            external_id: None,
        }
    }

    /// Sets whether the language is active.
    #[must_use]
    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets the fallback language.
    #[must_use]
    pub fn fallback_language(mut self, fallback: Reference) -> Self {
        self.fallback_language = Some(fallback);
        self
    }

    /// Sets the external identifier.
    #[must_use]
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }
}

/// A typed language patch. Every variant replaces one property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguagePatch {
    /// Renames the language.
    Name(String),
    /// Changes the codename.
    Codename(String),
    /// Changes the external identifier.
    ExternalId(String),
    /// Activates or deactivates the language.
    IsActive(bool),
    /// Points the language at another fallback.
    FallbackLanguage(Reference),
}

impl From<LanguagePatch> for PatchOperation {
    fn from(patch: LanguagePatch) -> Self {
        match patch {
            LanguagePatch::Name(name) => Self::replace("name", name),
            LanguagePatch::Codename(codename) => Self::replace("codename", codename),
            LanguagePatch::ExternalId(external_id) => Self::replace("external_id", external_id),
            LanguagePatch::IsActive(is_active) => Self::replace("is_active", is_active),
            LanguagePatch::FallbackLanguage(fallback) => Self::replace("fallback_language", fallback),
        }
    }
}

impl ManagementResource for LanguageModel {
    type CreateModel = LanguageCreateModel;

    const NAME: &'static str = "Language";
    const ENDPOINT: &'static str = "languages";
    const SCHEMA: ResourceSchema = LANGUAGE_SCHEMA;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::patch::PatchDocument;
    use serde_json::json;

    #[test]
    fn test_language_deserializes_from_service_shape() {
        let language: LanguageModel = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Default project language",
            "codename": "default",
            "external_id": "string",
            "is_active": true,
            "is_default": true,
            "fallback_language": {"id": "00000000-0000-0000-0000-000000000000"}
        }))
        .unwrap();

        assert_eq!(language.name, "Default project language");
        assert_eq!(language.codename, "default");
        assert!(language.is_active);
        assert!(language.is_default);
        assert_eq!(language.fallback_language.unwrap().id, Uuid::nil());
    }

    #[test]
    fn test_create_model_skips_unset_fields() {
        let model = LanguageCreateModel::new("German", "de-DE");
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({"name": "German", "codename": "de-DE"})
        );
    }

    #[test]
    fn test_create_model_with_fallback_by_id() {
        let model = LanguageCreateModel::new("German", "de-DE")
            .is_active(false)
            .fallback_language(Reference::by_id(Uuid::nil()))
            .external_id("lang-de");

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "name": "German",
                "codename": "de-DE",
                "is_active": false,
                "fallback_language": {"id": "00000000-0000-0000-0000-000000000000"},
                "external_id": "lang-de"
            })
        );
    }

    #[test]
    fn test_typed_patches_match_raw_operations() {
        let typed = PatchDocument::build(
            &LANGUAGE_SCHEMA,
            [
                LanguagePatch::IsActive(false),
                LanguagePatch::FallbackLanguage(Reference::by_codename("en-US")),
            ],
        )
        .unwrap();
        let raw = PatchDocument::build(
            &LANGUAGE_SCHEMA,
            [
                PatchOperation::replace("is_active", false),
                PatchOperation::replace("fallback_language", Reference::by_codename("en-US")),
            ],
        )
        .unwrap();

        assert_eq!(typed, raw);
    }

    #[test]
    fn test_every_language_patch_fits_the_schema() {
        let document = PatchDocument::build(
            &LANGUAGE_SCHEMA,
            [
                LanguagePatch::Name("Deutsch".to_string()),
                LanguagePatch::Codename("de-DE".to_string()),
                LanguagePatch::ExternalId("lang-de".to_string()),
                LanguagePatch::IsActive(true),
                LanguagePatch::FallbackLanguage(Reference::by_codename("en-US")),
            ],
        )
        .unwrap();

        let paths: Vec<_> = document.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            ["/name", "/codename", "/external_id", "/is_active", "/fallback_language"]
        );
    }
}
