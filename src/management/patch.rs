//! Partial update documents.
//!
//! A [`PatchDocument`] is an ordered list of operations against named
//! properties of a resource. Each resource family declares which properties
//! may be patched, which operation kinds each accepts and what value shape it
//! expects in a [`ResourceSchema`]. [`PatchDocument::build`] checks every
//! operation against that schema and either produces the whole document or
//! rejects it; no partial document is ever produced.
//!
//! # Wire Format
//!
//! ```json
//! [
//!   {"op": "replace", "path": "/fallback_language", "value": {"codename": "en-US"}},
//!   {"op": "replace", "path": "/name", "value": "Deutsch"},
//!   {"op": "move", "path": "/elements/codename:body", "after": {"codename": "title"}}
//! ]
//! ```
//!
//! Entries keep the order in which operations were supplied. The service
//! applies them sequentially.
//!
//! # Example
//!
//! ```rust
//! use kontent_management::{PatchDocument, PatchOperation, Reference};
//! use kontent_management::resources::LANGUAGE_SCHEMA;
//!
//! let document = PatchDocument::build(
//!     &LANGUAGE_SCHEMA,
//!     vec![
//!         PatchOperation::replace("fallback_language", Reference::by_codename("en-US")),
//!         PatchOperation::replace("name", "Deutsch"),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(document.len(), 2);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::management::reference::{InvalidReferenceError, Reference};
use crate::management::resources::ElementSchema;

/// The kind of a patch operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Appends a member to a collection property.
    Add,
    /// Removes a member from a collection property.
    Remove,
    /// Replaces a property value or a collection member.
    Replace,
    /// Reorders a member of a collection property.
    Move,
}

impl OperationKind {
    const fn carries_value(self) -> bool {
        matches!(self, Self::Add | Self::Replace)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Replace => write!(f, "replace"),
            Self::Move => write!(f, "move"),
        }
    }
}

/// The shape of a value a property accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A string.
    Text,
    /// A boolean.
    Boolean,
    /// A single reference object.
    Reference,
    /// A content type element.
    Element,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Boolean => write!(f, "boolean"),
            Self::Reference => write!(f, "reference"),
            Self::Element => write!(f, "element"),
        }
    }
}

/// A value carried by an `add` or `replace` operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatchValue {
    /// A string.
    Text(String),
    /// A boolean.
    Boolean(bool),
    /// A single reference.
    Reference(Reference),
    /// A content type element.
    Element(Box<ElementSchema>),
}

impl PatchValue {
    /// Returns the shape of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Reference(_) => ValueKind::Reference,
            Self::Element(_) => ValueKind::Element,
        }
    }

    fn references(&self) -> Vec<&Reference> {
        match self {
            Self::Text(_) | Self::Boolean(_) => Vec::new(),
            Self::Reference(reference) => vec![reference],
            Self::Element(element) => element.references().collect(),
        }
    }
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PatchValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Reference> for PatchValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<ElementSchema> for PatchValue {
    fn from(value: ElementSchema) -> Self {
        Self::Element(Box::new(value))
    }
}

/// Where a moved or added collection member is placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovePosition {
    /// Directly before the referenced member.
    Before(Reference),
    /// Directly after the referenced member.
    After(Reference),
}

impl MovePosition {
    const fn reference(&self) -> &Reference {
        match self {
            Self::Before(reference) | Self::After(reference) => reference,
        }
    }
}

/// Declares one patchable property of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertySchema {
    /// Property name as it appears in patch paths.
    pub name: &'static str,
    /// Operation kinds the property accepts.
    pub operations: &'static [OperationKind],
    /// Shape of the value `add`/`replace` carry.
    pub value: ValueKind,
    /// Whether the property is a collection whose members are addressed by reference.
    pub collection: bool,
}

impl PropertySchema {
    /// Declares a scalar property that only accepts `replace`.
    #[must_use]
    pub const fn replace_only(name: &'static str, value: ValueKind) -> Self {
        Self {
            name,
            operations: &[OperationKind::Replace],
            value,
            collection: false,
        }
    }

    /// Returns `true` if `kind` is permitted on this property.
    #[must_use]
    pub fn permits(&self, kind: OperationKind) -> bool {
        self.operations.contains(&kind)
    }
}

/// The set of patchable properties of a resource family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Resource family name, used in error messages.
    pub resource: &'static str,
    /// Patchable properties.
    pub properties: &'static [PropertySchema],
}

impl ResourceSchema {
    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A single mutation of one property.
///
/// Most callers use the typed patch enums of each resource family
/// (e.g. [`LanguagePatch`](crate::resources::LanguagePatch)), which convert
/// into `PatchOperation` and can only express well-shaped operations.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchOperation {
    /// Name of the patched property.
    pub property: String,
    /// Operation kind.
    pub kind: OperationKind,
    /// Collection member the operation addresses.
    pub target: Option<Reference>,
    /// Value for `add` and `replace`.
    pub value: Option<PatchValue>,
    /// Placement for `move` (and optionally `add`).
    pub position: Option<MovePosition>,
}

impl PatchOperation {
    fn new(property: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            property: property.into(),
            kind,
            target: None,
            value: None,
            position: None,
        }
    }

    /// Replaces a property value.
    #[must_use]
    pub fn replace(property: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(property, OperationKind::Replace)
        }
    }

    /// Adds a member to a collection property.
    #[must_use]
    pub fn add(property: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(property, OperationKind::Add)
        }
    }

    /// Removes the referenced member of a collection property.
    #[must_use]
    pub fn remove(property: impl Into<String>, target: Reference) -> Self {
        Self {
            target: Some(target),
            ..Self::new(property, OperationKind::Remove)
        }
    }

    /// Moves the referenced member of a collection property.
    #[must_use]
    pub fn move_member(
        property: impl Into<String>,
        target: Reference,
        position: MovePosition,
    ) -> Self {
        Self {
            target: Some(target),
            position: Some(position),
            ..Self::new(property, OperationKind::Move)
        }
    }

    /// Addresses a collection member.
    #[must_use]
    pub fn with_target(mut self, target: Reference) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets where the member is placed.
    #[must_use]
    pub fn with_position(mut self, position: MovePosition) -> Self {
        self.position = Some(position);
        self
    }

    fn references(&self) -> impl Iterator<Item = &Reference> {
        self.target
            .iter()
            .chain(self.position.as_ref().map(MovePosition::reference))
            .chain(self.value.iter().flat_map(PatchValue::references))
    }
}

/// Error returned when a patch operation does not fit the resource schema.
///
/// Every variant carries the zero-based index of the offending operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidPatchOperationError {
    /// The property is not patchable on this resource.
    #[error("Operation {index}: {resource} has no patchable property '{property}'")]
    UnknownProperty {
        /// Index of the offending operation.
        index: usize,
        /// Resource family name.
        resource: &'static str,
        /// The property that was named.
        property: String,
    },

    /// The operation kind is not permitted on the property.
    #[error("Operation {index}: '{op}' is not permitted on '{property}'")]
    OperationNotPermitted {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// The rejected operation kind.
        op: OperationKind,
    },

    /// `add` or `replace` without a value.
    #[error("Operation {index}: '{op}' on '{property}' requires a value")]
    MissingValue {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// Operation kind.
        op: OperationKind,
    },

    /// The value shape does not match the property.
    #[error("Operation {index}: '{property}' expects a {expected} value, got {found}")]
    ValueMismatch {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// Declared value shape.
        expected: ValueKind,
        /// Supplied value shape.
        found: ValueKind,
    },

    /// `remove` or `move` with a value.
    #[error("Operation {index}: '{op}' on '{property}' must not carry a value")]
    UnexpectedValue {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// Operation kind.
        op: OperationKind,
    },

    /// The operation must address a collection member.
    #[error("Operation {index}: '{op}' on '{property}' requires a target member")]
    MissingTarget {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// Operation kind.
        op: OperationKind,
    },

    /// A scalar property was given a target member.
    #[error("Operation {index}: '{property}' has no members to target")]
    UnexpectedTarget {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
    },

    /// `move` without a position.
    #[error("Operation {index}: 'move' on '{property}' requires a before or after position")]
    MissingPosition {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
    },

    /// A position on an operation that does not place members.
    #[error("Operation {index}: '{op}' on '{property}' does not accept a position")]
    UnexpectedPosition {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// Operation kind.
        op: OperationKind,
    },

    /// A reference in the target, value or position is invalid.
    #[error("Operation {index}: invalid reference in '{property}': {source}")]
    InvalidReference {
        /// Index of the offending operation.
        index: usize,
        /// Property name.
        property: String,
        /// The underlying reference error.
        #[source]
        source: InvalidReferenceError,
    },
}

impl InvalidPatchOperationError {
    /// Returns the index of the offending operation.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::UnknownProperty { index, .. }
            | Self::OperationNotPermitted { index, .. }
            | Self::MissingValue { index, .. }
            | Self::ValueMismatch { index, .. }
            | Self::UnexpectedValue { index, .. }
            | Self::MissingTarget { index, .. }
            | Self::UnexpectedTarget { index, .. }
            | Self::MissingPosition { index, .. }
            | Self::UnexpectedPosition { index, .. }
            | Self::InvalidReference { index, .. } => *index,
        }
    }
}

/// One serialized operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatchEntry {
    /// Operation kind.
    pub op: OperationKind,
    /// JSON pointer to the property or collection member.
    pub path: String,
    /// Value for `add` and `replace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PatchValue>,
    /// Member placed before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Reference>,
    /// Member placed after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Reference>,
}

/// A validated, ordered patch document.
///
/// Serializes as a JSON array of [`PatchEntry`] objects.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatchDocument {
    entries: Vec<PatchEntry>,
}

impl PatchDocument {
    /// Validates `operations` against `schema` and builds the document.
    ///
    /// Operations are checked in order. For each one:
    ///
    /// 1. the property must be declared by the schema
    /// 2. the kind must be permitted for the property
    /// 3. `add`/`replace` carry a value of the declared shape; `remove`/`move` carry none
    /// 4. collection members are targeted where required and only on collections
    /// 5. every nested reference must be valid
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidPatchOperationError`] found. No document is
    /// produced when any operation is invalid.
    pub fn build<I>(schema: &ResourceSchema, operations: I) -> Result<Self, InvalidPatchOperationError>
    where
        I: IntoIterator,
        I::Item: Into<PatchOperation>,
    {
        let entries = operations
            .into_iter()
            .map(Into::into)
            .enumerate()
            .map(|(index, operation)| validate_operation(schema, index, operation))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Returns the serialized entries in order.
    #[must_use]
    pub fn entries(&self) -> &[PatchEntry] {
        &self.entries
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the document into a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if an element value cannot be represented
    /// as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

fn validate_operation(
    schema: &ResourceSchema,
    index: usize,
    operation: PatchOperation,
) -> Result<PatchEntry, InvalidPatchOperationError> {
    let PatchOperation {
        property,
        kind,
        target,
        value,
        position,
    } = operation;

    let Some(declared) = schema.property(&property) else {
        return Err(InvalidPatchOperationError::UnknownProperty {
            index,
            resource: schema.resource,
            property,
        });
    };

    if !declared.permits(kind) {
        return Err(InvalidPatchOperationError::OperationNotPermitted {
            index,
            property,
            op: kind,
        });
    }

    match (&value, kind.carries_value()) {
        (None, true) => {
            return Err(InvalidPatchOperationError::MissingValue {
                index,
                property,
                op: kind,
            })
        }
        (Some(v), true) if v.kind() != declared.value => {
            return Err(InvalidPatchOperationError::ValueMismatch {
                index,
                property,
                expected: declared.value,
                found: v.kind(),
            })
        }
        (Some(_), false) => {
            return Err(InvalidPatchOperationError::UnexpectedValue {
                index,
                property,
                op: kind,
            })
        }
        _ => {}
    }

    if declared.collection {
        let needs_target = matches!(
            kind,
            OperationKind::Remove | OperationKind::Move | OperationKind::Replace
        );
        if needs_target && target.is_none() {
            return Err(InvalidPatchOperationError::MissingTarget {
                index,
                property,
                op: kind,
            });
        }
        if kind == OperationKind::Add && target.is_some() {
            return Err(InvalidPatchOperationError::UnexpectedTarget { index, property });
        }
    } else if target.is_some() {
        return Err(InvalidPatchOperationError::UnexpectedTarget { index, property });
    }

    match (kind, &position) {
        (OperationKind::Move, None) => {
            return Err(InvalidPatchOperationError::MissingPosition { index, property })
        }
        (OperationKind::Remove | OperationKind::Replace, Some(_)) => {
            return Err(InvalidPatchOperationError::UnexpectedPosition {
                index,
                property,
                op: kind,
            })
        }
        (OperationKind::Add, Some(_)) if !declared.collection => {
            return Err(InvalidPatchOperationError::UnexpectedPosition {
                index,
                property,
                op: kind,
            })
        }
        _ => {}
    }

    let operation = PatchOperation {
        property,
        kind,
        target,
        value,
        position,
    };
    let invalid = operation.references().find_map(|r| r.validate().err());
    if let Some(source) = invalid {
        return Err(InvalidPatchOperationError::InvalidReference {
            index,
            property: operation.property,
            source,
        });
    }

    let PatchOperation {
        property,
        target,
        value,
        position,
        ..
    } = operation;

    let path = match &target {
        Some(member) => format!(
            "/{property}/{}",
            member
                .pointer_segment()
                .map_err(|source| InvalidPatchOperationError::InvalidReference {
                    index,
                    property: property.clone(),
                    source,
                })?
        ),
        None => format!("/{property}"),
    };

    let (before, after) = match position {
        Some(MovePosition::Before(reference)) => (Some(reference), None),
        Some(MovePosition::After(reference)) => (None, Some(reference)),
        None => (None, None),
    };

    Ok(PatchEntry {
        op: kind,
        path,
        value,
        before,
        after,
    })
}
