//! Resource families of the Management API.
//!
//! | Family       | Endpoint    | Model                | Patch              |
//! |--------------|-------------|----------------------|--------------------|
//! | Language     | `languages` | [`LanguageModel`]    | [`LanguagePatch`]  |
//! | Content type | `types`     | [`ContentTypeModel`] | [`ContentTypePatch`] |
//! | Content item | `items`     | [`ContentItemModel`] | [`ContentItemPatch`] |
//! | Asset        | `assets`    | [`AssetModel`]       | [`AssetPatch`]     |

mod asset;
mod content_item;
mod content_type;
mod elements;
mod language;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::management::reference::Reference;

pub use asset::{
    AssetCreateModel, AssetDescription, AssetModel, AssetPatch, FileReference, ASSET_SCHEMA,
};
pub use content_item::{
    ContentItemCreateModel, ContentItemModel, ContentItemPatch, CONTENT_ITEM_SCHEMA,
};
pub use content_type::{
    ContentGroupModel, ContentTypeCreateModel, ContentTypeModel, ContentTypePatch,
    CONTENT_TYPE_SCHEMA,
};
pub use elements::{
    AssetElement, DateTimeElement, ElementDefault, ElementIdentity, ElementSchema,
    GuidelinesElement, LinkedItemsElement, MultipleChoiceElement, MultipleChoiceMode,
    MultipleChoiceOption, NumberElement, OtherElement, RichTextElement, TextElement, TypeValue,
};
pub use language::{LanguageCreateModel, LanguageModel, LanguagePatch, LANGUAGE_SCHEMA};

/// A reference the service always returns by identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdReference {
    /// The referenced resource's internal identifier.
    pub id: Uuid,
}

impl From<IdReference> for Reference {
    fn from(reference: IdReference) -> Self {
        Self::ById(reference.id)
    }
}
