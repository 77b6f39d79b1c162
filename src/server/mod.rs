// Server module entry
// Listener setup, connection handling and the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), use server_loop instead
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::{bind, create_reusable_listener};
pub use server_loop::start_server_loop;
pub use signal::ShutdownSignal;
