//! [`SchoolApi`](crate::services::school_api::SchoolApi) implementations.
//!
//! [`RestSchoolClient`] talks to the backend over HTTP; [`FileSchoolSource`]
//! reads JSON snapshots from disk for offline rendering.

mod client;
mod file;

pub use client::RestSchoolClient;
pub use file::FileSchoolSource;
