//! Content type element schemas.
//!
//! [`ElementSchema`] covers the element kinds this crate models, tagged on the
//! wire by the `type` field. Any other kind (taxonomy, URL slug, snippet,
//! custom, subpages) is kept as an [`OtherElement`] with its properties
//! untouched. Elements that accept a default value wrap it in
//! [`ElementDefault<T>`], a generic container over the element's value type:
//!
//! | Element          | Default value type       |
//! |------------------|--------------------------|
//! | text             | `String`                 |
//! | number           | `f64`                    |
//! | date & time      | `DateTime<Utc>`          |
//! | multiple choice  | `Vec<Reference>`         |
//! | asset            | `Vec<Reference>`         |
//! | linked items     | `Vec<Reference>`         |
//!
//! # Example
//!
//! ```rust
//! use kontent_management::resources::{ElementDefault, ElementSchema, TextElement};
//!
//! let element = ElementSchema::Text(
//!     TextElement::new("Title")
//!         .codename("title")
//!         .default_value(ElementDefault::new("Untitled".to_string())),
//! );
//!
//! let json = serde_json::to_value(&element).unwrap();
//! assert_eq!(json["type"], "text");
//! assert_eq!(json["default"]["global"]["value"], "Untitled");
//! ```

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::management::Reference;

/// A value wrapped the way the service nests element values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeValue<T> {
    /// The wrapped value.
    pub value: T,
}

/// The default value of an element, applied across all languages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDefault<T> {
    /// The default shared by every language variant.
    pub global: TypeValue<T>,
}

impl<T> ElementDefault<T> {
    /// Wraps `value` as a global default.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            global: TypeValue { value },
        }
    }

    /// Returns the wrapped default.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.global.value
    }
}

/// Properties shared by every element kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIdentity {
    /// Internal identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Element codename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// Caller-assigned external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// The content group the element belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_group: Option<Reference>,
}

macro_rules! element_setters {
    ($ty:ident) => {
        impl $ty {
            /// Sets the element codename.
            #[must_use]
            pub fn codename(mut self, codename: impl Into<String>) -> Self {
                self.identity.codename = Some(codename.into());
                self
            }

            /// Sets the element external identifier.
            #[must_use]
            pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
                self.identity.external_id = Some(external_id.into());
                self
            }

            /// Places the element into a content group.
            #[must_use]
            pub fn content_group(mut self, group: Reference) -> Self {
                self.identity.content_group = Some(group);
                self
            }
        }
    };
}

macro_rules! named_element {
    ($(#[$meta:meta])* $ty:ident, $value:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        pub struct $ty {
            /// Shared identity properties.
            #[serde(flatten)]
            pub identity: ElementIdentity,
            /// Display name.
            pub name: String,
            /// Guidelines shown to content editors.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub guidelines: Option<String>,
            /// Whether editors must fill the element in.
            #[serde(default)]
            pub is_required: bool,
            /// Default value for new content items.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub default: Option<ElementDefault<$value>>,
        }

        impl $ty {
            /// Creates an element with the given display name.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    identity: ElementIdentity::default(),
                    name: name.into(),
                    guidelines: None,
                    is_required: false,
                    default: None,
                }
            }

            /// Sets the default value.
            #[must_use]
            pub fn default_value(mut self, default: ElementDefault<$value>) -> Self {
                self.default = Some(default);
                self
            }

            /// Marks the element as required.
            #[must_use]
            pub const fn required(mut self) -> Self {
                self.is_required = true;
                self
            }
        }

        element_setters!($ty);
    };
}

named_element!(
    /// A plain text element.
    TextElement,
    String
);

named_element!(
    /// A numeric element.
    NumberElement,
    f64
);

named_element!(
    /// A date and time element.
    DateTimeElement,
    DateTime<Utc>
);

named_element!(
    /// An asset element. The default lists referenced assets.
    AssetElement,
    Vec<Reference>
);

/// A rich text element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RichTextElement {
    /// Shared identity properties.
    #[serde(flatten)]
    pub identity: ElementIdentity,
    /// Display name.
    pub name: String,
    /// Guidelines shown to content editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    /// Whether editors must fill the element in.
    #[serde(default)]
    pub is_required: bool,
}

impl RichTextElement {
    /// Creates a rich text element with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: ElementIdentity::default(),
            name: name.into(),
            guidelines: None,
            is_required: false,
        }
    }
}

element_setters!(RichTextElement);

/// Whether a multiple choice element accepts one option or several.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleChoiceMode {
    /// Exactly one option may be selected.
    Single,
    /// Any number of options may be selected.
    Multiple,
}

/// An option of a multiple choice element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceOption {
    /// Internal identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Option codename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    /// Caller-assigned external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// A multiple choice element. The default lists selected options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceElement {
    /// Shared identity properties.
    #[serde(flatten)]
    pub identity: ElementIdentity,
    /// Display name.
    pub name: String,
    /// Selection mode.
    pub mode: MultipleChoiceMode,
    /// Available options.
    #[serde(default)]
    pub options: Vec<MultipleChoiceOption>,
    /// Guidelines shown to content editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    /// Whether editors must fill the element in.
    #[serde(default)]
    pub is_required: bool,
    /// Options selected by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ElementDefault<Vec<Reference>>>,
}

element_setters!(MultipleChoiceElement);

/// A linked items element, referencing other content items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkedItemsElement {
    /// Shared identity properties.
    #[serde(flatten)]
    pub identity: ElementIdentity,
    /// Display name.
    pub name: String,
    /// Content types the linked items may be of. Empty means any type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_content_types: Vec<Reference>,
    /// Guidelines shown to content editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    /// Whether editors must fill the element in.
    #[serde(default)]
    pub is_required: bool,
    /// Items linked by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ElementDefault<Vec<Reference>>>,
}

element_setters!(LinkedItemsElement);

/// A guidelines block. Holds no content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelinesElement {
    /// Shared identity properties.
    #[serde(flatten)]
    pub identity: ElementIdentity,
    /// Guidelines text (rich text HTML).
    pub guidelines: String,
}

element_setters!(GuidelinesElement);

/// An element of a kind without a dedicated type.
///
/// Serializes back to the same shape it was read from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OtherElement {
    /// The wire `type` tag, e.g. `taxonomy` or `url_slug`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Shared identity properties.
    #[serde(flatten)]
    pub identity: ElementIdentity,
    /// Every other property, as sent by the service.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl OtherElement {
    fn from_object(kind: String, mut object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        object.remove("type");
        let identity = ElementIdentity::deserialize(Value::Object(object.clone()))?;
        for key in ["id", "codename", "external_id", "content_group"] {
            object.remove(key);
        }
        Ok(Self {
            kind,
            identity,
            properties: object,
        })
    }
}

/// Wire tags with a dedicated [`ElementSchema`] variant.
const MODELLED_KINDS: &[&str] = &[
    "text",
    "rich_text",
    "number",
    "date_time",
    "multiple_choice",
    "asset",
    "modular_content",
    "guidelines",
];

/// An element of a content type.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementSchema {
    /// Plain text.
    Text(TextElement),
    /// Rich text.
    RichText(RichTextElement),
    /// Number.
    Number(NumberElement),
    /// Date and time.
    DateTime(DateTimeElement),
    /// Multiple choice.
    MultipleChoice(MultipleChoiceElement),
    /// Asset.
    Asset(AssetElement),
    /// Linked items.
    LinkedItems(LinkedItemsElement),
    /// Guidelines.
    Guidelines(GuidelinesElement),
    /// Any other element kind.
    Other(OtherElement),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ModelledRef<'a> {
    Text(&'a TextElement),
    RichText(&'a RichTextElement),
    Number(&'a NumberElement),
    DateTime(&'a DateTimeElement),
    MultipleChoice(&'a MultipleChoiceElement),
    Asset(&'a AssetElement),
    #[serde(rename = "modular_content")]
    LinkedItems(&'a LinkedItemsElement),
    Guidelines(&'a GuidelinesElement),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Modelled {
    Text(TextElement),
    RichText(RichTextElement),
    Number(NumberElement),
    DateTime(DateTimeElement),
    MultipleChoice(MultipleChoiceElement),
    Asset(AssetElement),
    #[serde(rename = "modular_content")]
    LinkedItems(LinkedItemsElement),
    Guidelines(GuidelinesElement),
}

impl From<Modelled> for ElementSchema {
    fn from(element: Modelled) -> Self {
        match element {
            Modelled::Text(e) => Self::Text(e),
            Modelled::RichText(e) => Self::RichText(e),
            Modelled::Number(e) => Self::Number(e),
            Modelled::DateTime(e) => Self::DateTime(e),
            Modelled::MultipleChoice(e) => Self::MultipleChoice(e),
            Modelled::Asset(e) => Self::Asset(e),
            Modelled::LinkedItems(e) => Self::LinkedItems(e),
            Modelled::Guidelines(e) => Self::Guidelines(e),
        }
    }
}

impl Serialize for ElementSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let modelled = match self {
            Self::Text(e) => ModelledRef::Text(e),
            Self::RichText(e) => ModelledRef::RichText(e),
            Self::Number(e) => ModelledRef::Number(e),
            Self::DateTime(e) => ModelledRef::DateTime(e),
            Self::MultipleChoice(e) => ModelledRef::MultipleChoice(e),
            Self::Asset(e) => ModelledRef::Asset(e),
            Self::LinkedItems(e) => ModelledRef::LinkedItems(e),
            Self::Guidelines(e) => ModelledRef::Guidelines(e),
            Self::Other(e) => return e.serialize(serializer),
        };
        modelled.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElementSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(object) = Value::deserialize(deserializer)? else {
            return Err(D::Error::custom("element must be a JSON object"));
        };
        let kind = match object.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            _ => return Err(D::Error::missing_field("type")),
        };

        if MODELLED_KINDS.contains(&kind.as_str()) {
            serde_json::from_value::<Modelled>(Value::Object(object))
                .map(Self::from)
                .map_err(D::Error::custom)
        } else {
            OtherElement::from_object(kind, object)
                .map(Self::Other)
                .map_err(D::Error::custom)
        }
    }
}

impl ElementSchema {
    /// Returns the shared identity properties.
    #[must_use]
    pub const fn identity(&self) -> &ElementIdentity {
        match self {
            Self::Text(e) => &e.identity,
            Self::RichText(e) => &e.identity,
            Self::Number(e) => &e.identity,
            Self::DateTime(e) => &e.identity,
            Self::MultipleChoice(e) => &e.identity,
            Self::Asset(e) => &e.identity,
            Self::LinkedItems(e) => &e.identity,
            Self::Guidelines(e) => &e.identity,
            Self::Other(e) => &e.identity,
        }
    }

    /// Returns the element codename, if set.
    #[must_use]
    pub fn codename(&self) -> Option<&str> {
        self.identity().codename.as_deref()
    }

    /// Returns every reference nested in the element.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        let defaults: &[Reference] = match self {
            Self::MultipleChoice(e) => e.default.as_ref().map_or(&[][..], |d| d.value().as_slice()),
            Self::Asset(e) => e.default.as_ref().map_or(&[][..], |d| d.value().as_slice()),
            Self::LinkedItems(e) => e.default.as_ref().map_or(&[][..], |d| d.value().as_slice()),
            _ => &[],
        };
        let allowed: &[Reference] = match self {
            Self::LinkedItems(e) => &e.allowed_content_types,
            _ => &[],
        };
        self.identity()
            .content_group
            .iter()
            .chain(defaults)
            .chain(allowed)
    }
}
