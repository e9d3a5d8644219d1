//! # polysite-client
//!
//! Read-only client for the headless CMS that backs the site.
//!
//! Requests use the CMS's bracketed query convention
//! (`filters[field][$eq]`, `populate[field]`, `pagination[pageSize]`),
//! responses are flattened with [`polysite_core::normalize`], and every
//! failure degrades to an empty result after being logged.

pub mod client;
pub mod error;
pub mod query;

pub use client::{typed, CategoryGlimpse, CmsClient};
pub use error::{FetchError, Result};
pub use query::{ContentQuery, Filter, Resource, Sort};
