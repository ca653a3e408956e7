//! The Management API client facade.
//!
//! [`ManagementClient`] owns the transport and hands out a
//! [`ResourceClient`] per resource family:
//!
//! ```rust,ignore
//! use kontent_management::{ApiKey, ManagementClient, ManagementConfig, Reference};
//! use kontent_management::resources::LanguagePatch;
//!
//! let config = ManagementConfig::builder()
//!     .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse()?)
//!     .api_key(ApiKey::new("management-api-key")?)
//!     .build()?;
//!
//! let client = ManagementClient::new(config)?;
//!
//! let language = client.languages().get(&Reference::by_codename("de-DE")).await?;
//! let language = client
//!     .languages()
//!     .modify(&Reference::by_id(language.id), [LanguagePatch::Name("Deutsch".into())])
//!     .await?;
//! ```
//!
//! Each operation sends exactly one request (listings send one per page).
//! Invalid references and patch operations are rejected before anything is
//! sent.

use std::marker::PhantomData;

use crate::clients::RestClient;
use crate::config::ManagementConfig;
use crate::management::errors::ManagementError;
use crate::management::listing::ListingResponse;
use crate::management::patch::{PatchDocument, PatchOperation};
use crate::management::reference::Reference;
use crate::management::resource::ManagementResource;
use crate::management::resources::{AssetModel, ContentItemModel, ContentTypeModel, LanguageModel};

/// Client for the Management API of one environment.
///
/// # Thread Safety
///
/// `ManagementClient` is `Send + Sync`. Calls share nothing but the
/// connection pool, so one client can serve concurrent tasks.
#[derive(Debug)]
pub struct ManagementClient {
    rest: RestClient,
    config: ManagementConfig,
}

// Verify ManagementClient and ResourceClient are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ManagementClient>();
    assert_send_sync::<ResourceClient<'static, LanguageModel>>();
};

impl ManagementClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ManagementConfig) -> Result<Self, ManagementError> {
        let rest = RestClient::new(&config)?;
        Ok(Self { rest, config })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ManagementConfig {
        &self.config
    }

    /// Returns a client for any resource family.
    #[must_use]
    pub const fn resource<R: ManagementResource>(&self) -> ResourceClient<'_, R> {
        ResourceClient {
            rest: &self.rest,
            _resource: PhantomData,
        }
    }

    /// Languages.
    #[must_use]
    pub const fn languages(&self) -> ResourceClient<'_, LanguageModel> {
        self.resource()
    }

    /// Content types.
    #[must_use]
    pub const fn content_types(&self) -> ResourceClient<'_, ContentTypeModel> {
        self.resource()
    }

    /// Content items.
    #[must_use]
    pub const fn content_items(&self) -> ResourceClient<'_, ContentItemModel> {
        self.resource()
    }

    /// Assets.
    #[must_use]
    pub const fn assets(&self) -> ResourceClient<'_, AssetModel> {
        self.resource()
    }
}

/// Operations on one resource family.
#[derive(Debug)]
pub struct ResourceClient<'a, R> {
    rest: &'a RestClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceClient<'_, R> {}

impl<'a, R: ManagementResource> ResourceClient<'a, R> {
    /// Creates a resource.
    ///
    /// Sends `POST /{endpoint}`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::Validation`] when the service rejects the
    /// payload, or another [`ManagementError`] for transport failures.
    pub async fn create(&self, model: &R::CreateModel) -> Result<R, ManagementError> {
        let body = serde_json::to_value(model).map_err(|source| ManagementError::Serialization {
            resource: R::NAME,
            source,
        })?;

        tracing::debug!(resource = R::NAME, "Creating resource");

        let response = self
            .rest
            .post(R::ENDPOINT, body)
            .await
            .map_err(|e| ManagementError::from_rest_error(e, R::NAME, None))?;

        parse_model(response.body)
    }

    /// Fetches one resource.
    ///
    /// Sends `GET /{endpoint}/{reference}`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::InvalidReference`] without sending anything
    /// if the reference is invalid, and [`ManagementError::NotFound`] if the
    /// resource does not exist.
    pub async fn get(&self, reference: &Reference) -> Result<R, ManagementError> {
        let path = resource_path::<R>(reference)?;

        let response = self
            .rest
            .get(&path, None)
            .await
            .map_err(|e| ManagementError::from_rest_error(e, R::NAME, Some(reference)))?;

        parse_model(response.body)
    }

    /// Lists every resource of the family.
    ///
    /// Sends `GET /{endpoint}` when the first item is pulled, then one request
    /// per continuation page.
    #[must_use]
    pub fn list(&self) -> ListingResponse<'a, R> {
        ListingResponse::new(self.rest, R::NAME, R::ENDPOINT)
    }

    /// Applies patch operations to a resource and returns the updated model.
    ///
    /// Sends `PATCH /{endpoint}/{reference}` with the operations as a JSON
    /// array, in the order given. Accepts the family's typed patch enum or raw
    /// [`PatchOperation`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::InvalidReference`] or
    /// [`ManagementError::InvalidPatchOperation`] without sending anything,
    /// [`ManagementError::NotFound`] if the resource does not exist and
    /// [`ManagementError::Validation`] if the service rejects the changes.
    pub async fn modify<I>(&self, reference: &Reference, operations: I) -> Result<R, ManagementError>
    where
        I: IntoIterator,
        I::Item: Into<PatchOperation>,
    {
        let path = resource_path::<R>(reference)?;
        let document = PatchDocument::build(&R::SCHEMA, operations)?;
        let body = document.to_json().map_err(|source| ManagementError::Serialization {
            resource: R::NAME,
            source,
        })?;

        tracing::debug!(
            resource = R::NAME,
            operations = document.len(),
            "Modifying resource"
        );

        let response = self
            .rest
            .patch(&path, body)
            .await
            .map_err(|e| ManagementError::from_rest_error(e, R::NAME, Some(reference)))?;

        parse_model(response.body)
    }

    /// Deletes a resource.
    ///
    /// Sends `DELETE /{endpoint}/{reference}`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::InvalidReference`] without sending anything
    /// if the reference is invalid, and [`ManagementError::NotFound`] if the
    /// resource does not exist.
    pub async fn delete(&self, reference: &Reference) -> Result<(), ManagementError> {
        let path = resource_path::<R>(reference)?;

        tracing::debug!(resource = R::NAME, %reference, "Deleting resource");

        self.rest
            .delete(&path)
            .await
            .map_err(|e| ManagementError::from_rest_error(e, R::NAME, Some(reference)))?;

        Ok(())
    }
}

fn resource_path<R: ManagementResource>(reference: &Reference) -> Result<String, ManagementError> {
    Ok(format!("{}/{}", R::ENDPOINT, reference.resolve()?))
}

fn parse_model<R: ManagementResource>(body: serde_json::Value) -> Result<R, ManagementError> {
    serde_json::from_value(body).map_err(|source| ManagementError::Deserialization {
        resource: R::NAME,
        source,
    })
}
