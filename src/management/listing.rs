//! Lazy traversal of paginated listings.
//!
//! Listing endpoints return one page at a time:
//!
//! ```json
//! {
//!   "items": [ ... ],
//!   "pagination": {"continuation_token": "+RID:~...", "next_page": "https://..."}
//! }
//! ```
//!
//! [`ListingResponse`] turns that into a single ordered sequence. Nothing is
//! fetched until the first item is pulled. When the buffered page runs out and
//! the last page carried a continuation token, the next page is requested with
//! the token in the `x-continuation` header. A page without a token ends the
//! listing; later pulls return `None` without touching the network.
//!
//! Items are yielded in page order and, within a page, in the order the
//! service returned them. The listing does not deduplicate or detect changes
//! made between page fetches, so a collection modified while it is being
//! walked can yield duplicates or skip items.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut languages = client.languages().list();
//! while let Some(language) = languages.next().await? {
//!     println!("{}", language.codename);
//! }
//!
//! // or collect everything
//! let all = client.languages().list().get_all().await?;
//! ```

use std::collections::{HashMap, VecDeque};

use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::RestClient;
use crate::management::errors::ManagementError;

/// Request header carrying the continuation token.
pub const CONTINUATION_HEADER: &str = "x-continuation";

/// One page of a listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items in service order.
    pub items: Vec<T>,
    /// Cursor for the next page. `None` on the last page.
    pub continuation_token: Option<String>,
}

impl<T> Page<T> {
    /// Returns `true` if no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.continuation_token.is_none()
    }
}

/// Pagination block of a listing response.
#[derive(Clone, Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default)]
    continuation_token: Option<String>,
}

/// Wire shape of a listing response. The collection key is `items` for most
/// families; some endpoints name it after the family.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct ListingEnvelope<T> {
    #[serde(alias = "languages", alias = "types", alias = "assets")]
    items: Vec<T>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ListingState {
    NotStarted,
    Continue(String),
    Finished,
}

/// A lazily fetched, order-preserving sequence of listed resources.
///
/// Each `ListingResponse` walks the listing once. To start over, request a
/// new listing.
#[derive(Debug)]
pub struct ListingResponse<'a, T> {
    client: &'a RestClient,
    resource: &'static str,
    path: String,
    buffer: VecDeque<T>,
    state: ListingState,
    pages_fetched: usize,
}

impl<'a, T: DeserializeOwned> ListingResponse<'a, T> {
    pub(crate) fn new(client: &'a RestClient, resource: &'static str, path: impl Into<String>) -> Self {
        Self {
            client,
            resource,
            path: path.into(),
            buffer: VecDeque::new(),
            state: ListingState::NotStarted,
            pages_fetched: 0,
        }
    }

    /// Returns how many pages have been requested so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns `true` once the last page has been fetched and fully consumed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == ListingState::Finished && self.buffer.is_empty()
    }

    /// Returns the next item, fetching the next page when needed.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError`] if a page cannot be fetched or parsed. The
    /// listing is finished after an error.
    pub async fn next(&mut self) -> Result<Option<T>, ManagementError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            match self.fetch_page().await? {
                Some(page) => self.buffer.extend(page.items),
                None => return Ok(None),
            }
        }
    }

    /// Returns the rest of the current page, or fetches the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError`] if the page cannot be fetched or parsed.
    pub async fn next_page(&mut self) -> Result<Option<Page<T>>, ManagementError> {
        if !self.buffer.is_empty() {
            let continuation_token = match &self.state {
                ListingState::Continue(token) => Some(token.clone()),
                _ => None,
            };
            return Ok(Some(Page {
                items: self.buffer.drain(..).collect(),
                continuation_token,
            }));
        }
        self.fetch_page().await
    }

    /// Consumes the listing and collects every remaining item.
    ///
    /// # Errors
    ///
    /// Returns the first [`ManagementError`] encountered.
    pub async fn get_all(mut self) -> Result<Vec<T>, ManagementError> {
        let mut items: Vec<T> = self.buffer.drain(..).collect();
        while let Some(page) = self.fetch_page().await? {
            items.extend(page.items);
        }
        Ok(items)
    }

    /// Converts the listing into a [`Stream`] of items.
    ///
    /// The stream ends after the last page, or right after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ManagementError>> + 'a
    where
        T: 'a,
    {
        stream::try_unfold(self, |mut listing| async move {
            Ok(listing.next().await?.map(|item| (item, listing)))
        })
    }

    async fn fetch_page(&mut self) -> Result<Option<Page<T>>, ManagementError> {
        let headers = match &self.state {
            ListingState::Finished => return Ok(None),
            ListingState::NotStarted => None,
            ListingState::Continue(token) => Some(HashMap::from([(
                CONTINUATION_HEADER.to_string(),
                token.clone(),
            )])),
        };

        tracing::debug!(
            resource = self.resource,
            page = self.pages_fetched + 1,
            continued = headers.is_some(),
            "Fetching listing page"
        );

        let result = self.client.get(&self.path, headers).await;
        self.pages_fetched += 1;

        let page = result
            .map_err(|e| ManagementError::from_rest_error(e, self.resource, None))
            .and_then(|response| {
                serde_json::from_value::<ListingEnvelope<T>>(response.body).map_err(|source| {
                    ManagementError::Deserialization {
                        resource: self.resource,
                        source,
                    }
                })
            });

        let envelope = match page {
            Ok(envelope) => envelope,
            Err(e) => {
                self.state = ListingState::Finished;
                return Err(e);
            }
        };

        let continuation_token = envelope
            .pagination
            .continuation_token
            .filter(|token| !token.is_empty());

        self.state = continuation_token
            .clone()
            .map_or(ListingState::Finished, ListingState::Continue);

        Ok(Some(Page {
            items: envelope.items,
            continuation_token,
        }))
    }
}
