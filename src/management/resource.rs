//! Resource family trait.
//!
//! Each family the Management API exposes (languages, content types, content
//! items, assets) implements [`ManagementResource`] on its response model.
//! The trait ties together what the generic
//! [`ResourceClient`](crate::ResourceClient) needs: the endpoint, the create
//! payload and the patch schema. Each family also has a typed patch enum
//! (e.g. `LanguagePatch`) that converts into
//! [`PatchOperation`](crate::PatchOperation)s.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! impl ManagementResource for LanguageModel {
//!     type CreateModel = LanguageCreateModel;
//!
//!     const NAME: &'static str = "Language";
//!     const ENDPOINT: &'static str = "languages";
//!     const SCHEMA: ResourceSchema = LANGUAGE_SCHEMA;
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::management::patch::ResourceSchema;

/// A resource family of the Management API.
pub trait ManagementResource: DeserializeOwned + Send + Sync + Sized {
    /// Payload sent to create a resource.
    type CreateModel: Serialize + Send + Sync;

    /// Singular name used in errors and logs (e.g., "Language").
    const NAME: &'static str;

    /// Collection endpoint relative to the environment (e.g., "languages").
    const ENDPOINT: &'static str;

    /// Patchable properties.
    const SCHEMA: ResourceSchema;
}
