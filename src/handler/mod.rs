//! Request handler module
//!
//! Responsible for route lookup, method dispatch and fixture responses.

pub mod fixture;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
