//! Client for the CREOL People web service.
//!
//! This module provides the `ApiClient` for fetching directory records from
//! `People.asmx/GetData`. The service takes positional query parameters (a
//! bare mode token followed by `name=value` filters) and answers with a JSON
//! envelope whose `response` field holds the record array.

pub mod client;
pub mod error;
pub mod query;

pub use client::{ApiClient, API_BASE_URL};
pub use error::ApiError;
pub use query::{encode_query, QueryParam};
