//! # Google API Toolkit
//!
//! Typed, paginated access to Google-style REST resource APIs such as the
//! People API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for credentials and the service base URL
//! - An async HTTP client with retry and backoff for transient failures
//! - Serializers converting between JSON payloads and model types
//! - Resource APIs offering get, batch get, create, update, delete and list
//! - Lazy pagination: [`Page`], [`PageSequencer`] and [`ResourceIterator`]
//!
//! ## Quick Start
//!
//! ```rust
//! use google_api_toolkit::{AccessToken, ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://people.googleapis.com/v1").unwrap())
//!     .access_token(AccessToken::new("ya29.a0Af...").unwrap())
//!     .page_size(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.num_retries(), 5);
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use google_api_toolkit::{ResourceApi, RestApi, RestClient, Step};
//!
//! let client = RestClient::new(&config)?;
//! let people = ResourceApi::<Person>::for_resource(client, &config)
//!     .with_param("personFields", "names,emailAddresses");
//!
//! // One page at a time
//! let page = people.list(None, None).await?;
//! if let Some(next) = page.next_page() {
//!     let second = next.fetch().await?;
//! }
//!
//! // Or every item, fetching pages on demand
//! let mut contacts = people.iterate(None, None).await?;
//! while let Step::Item(contact) = contacts.next().await? {
//!     println!("{contact:?}");
//! }
//! ```
//!
//! ## Pagination Without a Server
//!
//! Pages and continuations are plain values, so any page source can be
//! traversed:
//!
//! ```rust
//! use google_api_toolkit::{NextPage, Page, ResourceError, ResourceIterator};
//!
//! let tail = NextPage::new(|| async { Ok(Page::last(vec![3, 4])) });
//! let head: Page<u32, ResourceError> = Page::new(vec![1, 2], Some("t1".into()), Some(tail));
//!
//! let all = tokio_test::block_on(ResourceIterator::new(head).try_collect()).unwrap();
//! assert_eq!(all, vec![1, 2, 3, 4]);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Lazy**: A page is fetched only when a consumer needs its items

pub mod clients;
pub mod config;
pub mod error;
pub mod pages;
pub mod rest;
pub mod serializers;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiConfig, ApiConfigBuilder, ApiKey, BaseUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, PreparedRequest,
    RestClient, RestError,
};

// Re-export pagination types
pub use pages::{
    NextPage, Page, PageSequencer, PaginationError, ResourceIterator, Step,
    DEFAULT_MAX_EMPTY_PAGES,
};

// Re-export resource API types
pub use rest::{
    BatchGetResponse, EmptyResponse, RequestBuilder, ResourceApi, ResourceDescriptor,
    ResourceError, RestApi, RestResource,
};

// Re-export serializer types
pub use serializers::{DictSerializer, ModelSerializer, Serializer, SerializerError};
