//! Core library for the shelfsync command line application.
//!
//! The library exposes the catalog pipelines that power the command-line
//! interface as well as the integration tests. CSV adapters live under
//! [`io`], the in-memory table in [`model`], header alias lookup in
//! [`headers`], and the three pipelines in [`dedupe`], [`split`], and
//! [`convert`].

pub mod convert;
pub mod dedupe;
pub mod error;
pub mod headers;
pub mod io;
pub mod model;
pub mod split;

pub use error::{Result, ToolError};
