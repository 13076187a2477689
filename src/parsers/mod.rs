//! Parsers for ProfFinder backend responses
//!
//! # Error Handling Strategy
//!
//! Response parsing degrades gracefully, the same way for every field:
//!
//! - **Whole body**: a body that is not a JSON object is the only hard failure
//!   ([`crate::error::ResponseError`]); the session turns it into one `error` message.
//!
//! - **Individual fields**: each field is resolved through an alias fallback chain (see
//!   [`aliases`]). A missing or mistyped field falls back to the next alias, then to a default.
//!
//! - **Individual records**: professor entries that are not JSON objects are skipped with a
//!   warning instead of rejecting the response.

pub mod aliases;
pub mod response;

pub use response::{NormalizedResponse, normalize_professor, parse_response};
