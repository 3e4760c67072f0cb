//! HTTP client module for conformance checks
//!
//! Provides the request/response plumbing every check goes through.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
