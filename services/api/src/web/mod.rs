pub mod orchestrator;
pub mod rest;
pub mod router;
pub mod state;

// Re-export the pieces the binaries need to build the web server.
pub use rest::{handle_request, ApiDoc};
pub use router::build_router;
pub use state::AppState;
