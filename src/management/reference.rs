//! Polymorphic resource references.
//!
//! Every Management API resource can be addressed by its internal identifier,
//! its codename or an external identifier assigned by the caller. [`Reference`]
//! captures exactly one of those and knows how to render itself as:
//!
//! - a URL path segment (`{id}`, `codename/{codename}`, `external-id/{external_id}`)
//! - a JSON payload object (`{"id": ...}`, `{"codename": ...}`, `{"external_id": ...}`)
//! - a JSON-pointer segment used to address collection members in patch paths
//!
//! # Example
//!
//! ```rust
//! use kontent_management::Reference;
//!
//! let reference = Reference::by_codename("de-DE");
//! assert_eq!(reference.resolve().unwrap(), "codename/de-DE");
//!
//! let reference = Reference::parse_id("00000000-0000-0000-0000-000000000000").unwrap();
//! assert_eq!(reference.resolve().unwrap(), "00000000-0000-0000-0000-000000000000");
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a reference cannot address a resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidReferenceError {
    /// The codename or external identifier is empty or whitespace.
    #[error("Reference by {kind} must not be empty")]
    Empty {
        /// Which kind of reference was empty (`codename` or `external_id`).
        kind: &'static str,
    },

    /// The identifier is not a valid UUID.
    #[error("'{value}' is not a valid identifier: {reason}")]
    MalformedId {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A payload object carried none of `id`, `codename` or `external_id`.
    #[error("Reference object must contain one of 'id', 'codename' or 'external_id'")]
    MissingDiscriminant,
}

/// A locator for a Management API resource.
///
/// Exactly one variant is active. References are immutable once constructed;
/// constructors accept any string and validation happens in [`Reference::resolve`]
/// and [`Reference::validate`], so invalid references are always reported
/// before a request is sent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawReference")]
pub enum Reference {
    /// Addresses a resource by its internal identifier.
    ById(Uuid),
    /// Addresses a resource by its codename.
    ByCodename(String),
    /// Addresses a resource by a caller-assigned external identifier.
    ByExternalId(String),
}

impl Reference {
    /// Creates a reference by internal identifier.
    #[must_use]
    pub const fn by_id(id: Uuid) -> Self {
        Self::ById(id)
    }

    /// Creates a reference by codename.
    #[must_use]
    pub fn by_codename(codename: impl Into<String>) -> Self {
        Self::ByCodename(codename.into())
    }

    /// Creates a reference by external identifier.
    #[must_use]
    pub fn by_external_id(external_id: impl Into<String>) -> Self {
        Self::ByExternalId(external_id.into())
    }

    /// Parses a textual identifier into a [`Reference::ById`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReferenceError::MalformedId`] if `id` is not a UUID.
    pub fn parse_id(id: &str) -> Result<Self, InvalidReferenceError> {
        Uuid::parse_str(id.trim())
            .map(Self::ById)
            .map_err(|e| InvalidReferenceError::MalformedId {
                value: id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the payload key for the active variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ById(_) => "id",
            Self::ByCodename(_) => "codename",
            Self::ByExternalId(_) => "external_id",
        }
    }

    /// Checks that the active value can address a resource.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReferenceError::Empty`] for an empty or whitespace
    /// codename or external identifier.
    pub fn validate(&self) -> Result<(), InvalidReferenceError> {
        match self {
            Self::ById(_) => Ok(()),
            Self::ByCodename(value) | Self::ByExternalId(value) => {
                if value.trim().is_empty() {
                    Err(InvalidReferenceError::Empty { kind: self.kind() })
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Resolves the reference into a URL path segment.
    ///
    /// Codenames and external identifiers are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReferenceError`] if the reference fails [`Reference::validate`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use kontent_management::Reference;
    ///
    /// let reference = Reference::by_external_id("legacy/42");
    /// assert_eq!(reference.resolve().unwrap(), "external-id/legacy%2F42");
    ///
    /// assert!(Reference::by_codename("  ").resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<String, InvalidReferenceError> {
        self.validate()?;
        Ok(match self {
            Self::ById(id) => id.hyphenated().to_string(),
            Self::ByCodename(codename) => format!("codename/{}", urlencoding::encode(codename)),
            Self::ByExternalId(external_id) => {
                format!("external-id/{}", urlencoding::encode(external_id))
            }
        })
    }

    /// Renders the reference as a JSON-pointer segment (`codename:title`).
    ///
    /// `~` and `/` are escaped as `~0` and `~1`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReferenceError`] if the reference fails [`Reference::validate`].
    pub fn pointer_segment(&self) -> Result<String, InvalidReferenceError> {
        self.validate()?;
        let value = match self {
            Self::ById(id) => id.hyphenated().to_string(),
            Self::ByCodename(value) | Self::ByExternalId(value) => {
                value.replace('~', "~0").replace('/', "~1")
            }
        };
        Ok(format!("{}:{value}", self.kind()))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "id '{id}'"),
            Self::ByCodename(codename) => write!(f, "codename '{codename}'"),
            Self::ByExternalId(external_id) => write!(f, "external id '{external_id}'"),
        }
    }
}

impl From<Uuid> for Reference {
    fn from(id: Uuid) -> Self {
        Self::ById(id)
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::ById(id) => map.serialize_entry("id", id)?,
            Self::ByCodename(codename) => map.serialize_entry("codename", codename)?,
            Self::ByExternalId(external_id) => map.serialize_entry("external_id", external_id)?,
        }
        map.end()
    }
}

/// Wire shape of a reference payload. The service may echo several keys; the
/// identifier wins, then the codename, then the external identifier.
#[derive(Deserialize)]
struct RawReference {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    codename: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
}

impl TryFrom<RawReference> for Reference {
    type Error = InvalidReferenceError;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        if let Some(id) = raw.id {
            return Ok(Self::ById(id));
        }
        if let Some(codename) = raw.codename {
            return Ok(Self::ByCodename(codename));
        }
        raw.external_id
            .map(Self::ByExternalId)
            .ok_or(InvalidReferenceError::MissingDiscriminant)
    }
}
