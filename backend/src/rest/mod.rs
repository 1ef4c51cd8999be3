//! REST interface layer.
//!
//! Translates between HTTP and the domain: JSON (de)serialization,
//! envelope construction, and error-to-status mapping. No business
//! logic lives here; handlers build a command, call a service, and wrap
//! whatever comes back.

pub mod book_apis;
pub mod envelope;
pub mod mappers;
pub mod meta_apis;
pub mod user_apis;
