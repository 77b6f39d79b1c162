//! HTTP protocol layer module
//!
//! Response builders shared by the router, decoupled from fixture lookup.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_fixture_response,
    build_options_response, ALLOWED_METHODS,
};
