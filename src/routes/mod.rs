pub mod heartbeat;
mod router;

pub use router::create_router;

// Re-export AppState for convenience
pub use crate::state::AppState;
