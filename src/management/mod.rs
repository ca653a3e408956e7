//! Management API surface: references, patch documents, paged listings and
//! the client facade.
//!
//! # Overview
//!
//! - [`Reference`]: addresses a resource by id, codename or external id
//! - [`PatchDocument`]: an ordered, schema-checked list of patch operations
//! - [`ListingResponse`]: lazily walks continuation-token pages
//! - [`ManagementClient`]: create, get, list, modify and delete per family
//!
//! The resource families live in [`resources`].

mod client;
mod errors;
mod listing;
mod patch;
mod reference;
mod resource;
pub mod resources;

pub use client::{ManagementClient, ResourceClient};
pub use errors::ManagementError;
pub use listing::{ListingResponse, Page, CONTINUATION_HEADER};
pub use patch::{
    InvalidPatchOperationError, MovePosition, OperationKind, PatchDocument, PatchEntry,
    PatchOperation, PatchValue, PropertySchema, ResourceSchema, ValueKind,
};
pub use reference::{InvalidReferenceError, Reference};
pub use resource::ManagementResource;
