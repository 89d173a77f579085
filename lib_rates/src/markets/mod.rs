//! # Financial Market Feeds Module
//!
//! Client implementations and parsers for upstream rate publishers. Each
//! provider lives in its own folder so that new sources can be added without
//! touching the ingest or report operations.
//!
//! ## Contained Modules:
//!
//! - **`ecb`**: The European Central Bank daily reference-rate feed: the
//!   pattern-based parser and the HTTP client that downloads the document.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// European Central Bank daily reference rates.
pub mod ecb;
