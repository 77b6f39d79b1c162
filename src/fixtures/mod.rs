//! Fixture module
//!
//! The `{path -> file}` route table and the file reads behind it.

pub mod loader;
pub mod table;

pub use loader::load;
pub use table::{FixtureRoute, RouteTable};
