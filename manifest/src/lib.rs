//! Organization activity manifests
//!
//! # Overview
//!
//! A manifest lists every GitHub user who was active in the public repositories of an organization
//! together with how much they did: issues they opened, comments they left on issues and comments
//! they left on repositories.
//!
//! The `api` feature exposes the data model and the [`api::Client`] trait an API adapter implements.
//! The `report` feature adds the pipeline on top of it: a paginated [`fetcher::Fetcher`] collecting
//! activity records, the [`manifest::Manifest`] tallying them per login and the [`table`] writers
//! rendering the result as CSV or as a bordered text table.

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "report")]
pub mod fetcher;
#[cfg(feature = "report")]
pub mod manifest;
#[cfg(feature = "report")]
pub mod report;
#[cfg(feature = "report")]
pub mod table;

#[cfg(feature = "report")]
pub use crate::fetcher::{FetchOptions, Fetcher};
#[cfg(feature = "report")]
pub use crate::manifest::{Manifest, UserActivity};
#[cfg(feature = "report")]
pub use crate::report::ReportKind;
