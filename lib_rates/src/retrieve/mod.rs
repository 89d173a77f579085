//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients, primarily focused on HTTP-based interactions.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: A generic HTTP `ApiClient` built on `reqwest` and
//!   `reqwest-middleware`, with optional retries using exponential backoff.
//!   Feed clients (e.g. `markets::ecb::EcbFeed`) build on it and focus on
//!   interpreting the payload.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic HTTP API client with optional retry middleware.
pub mod ky_http;
