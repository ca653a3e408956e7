//! # Kontent.ai Management API Rust SDK
//!
//! A Rust client for the Kontent.ai Management API, providing type-safe
//! configuration, validated resource references, schema-checked patch
//! documents and lazily paged listings.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ManagementConfig`] and [`ManagementConfigBuilder`]
//! - Validated newtypes for the API key, environment id and endpoint
//! - [`Reference`] for addressing resources by id, codename or external id
//! - [`PatchDocument`] for building ordered JSON patch operations checked
//!   against each resource's schema
//! - [`ListingResponse`] for walking continuation-token pages one item at a time
//! - [`ManagementClient`] with create, get, list, modify and delete for
//!   languages, content types, content items and assets
//! - Async HTTP client with retry logic for reads
//!
//! ## Quick Start
//!
//! ```rust
//! use kontent_management::{ApiKey, ManagementConfig};
//!
//! let config = ManagementConfig::builder()
//!     .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse().unwrap())
//!     .api_key(ApiKey::new("your-management-api-key").unwrap())
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tries(), 3);
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use kontent_management::{ManagementClient, Reference};
//! use kontent_management::resources::{LanguageCreateModel, LanguagePatch};
//!
//! let client = ManagementClient::new(config)?;
//!
//! // Create
//! let german = client
//!     .languages()
//!     .create(&LanguageCreateModel::new("German", "de-DE"))
//!     .await?;
//!
//! // Modify, by any kind of reference
//! let german = client
//!     .languages()
//!     .modify(
//!         &Reference::by_codename("de-DE"),
//!         [
//!             LanguagePatch::FallbackLanguage(Reference::by_codename("en-US")),
//!             LanguagePatch::Name("Deutsch".to_string()),
//!         ],
//!     )
//!     .await?;
//!
//! // List every language, fetching pages on demand
//! let mut languages = client.languages().list();
//! while let Some(language) = languages.next().await? {
//!     println!("{}", language.codename);
//! }
//! ```
//!
//! ## Patch Documents
//!
//! Patch operations are validated before anything is sent:
//!
//! ```rust
//! use kontent_management::{PatchDocument, PatchOperation, Reference};
//! use kontent_management::resources::{LanguagePatch, LANGUAGE_SCHEMA};
//!
//! let document = PatchDocument::build(
//!     &LANGUAGE_SCHEMA,
//!     [
//!         LanguagePatch::Name("Deutsch".to_string()),
//!         LanguagePatch::FallbackLanguage(Reference::by_codename("en-US")),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(document.len(), 2);
//!
//! // Unknown properties are rejected locally.
//! let result = PatchDocument::build(&LANGUAGE_SCHEMA, [PatchOperation::replace("title", "x")]);
//! assert!(result.is_err());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: references and patches are checked before a request is built
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod management;

pub use management::resources;

// Re-export public types at crate root for convenience
pub use auth::TokenProvider;
pub use config::{ApiKey, EndpointUrl, EnvironmentId, ManagementConfig, ManagementConfigBuilder};
pub use error::ConfigError;

// Re-export the management surface
pub use management::{
    InvalidPatchOperationError, InvalidReferenceError, ListingResponse, ManagementClient,
    ManagementError, ManagementResource, MovePosition, OperationKind, Page, PatchDocument,
    PatchEntry, PatchOperation, PatchValue, PropertySchema, Reference, ResourceClient,
    ResourceSchema, ValueKind, CONTINUATION_HEADER,
};
