pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Environment, PromptConfig, Settings};
pub use router::{cors_layer, create_router};
pub use state::AppState;
