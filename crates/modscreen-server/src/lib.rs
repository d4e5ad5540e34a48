pub mod cli;
pub mod config;
pub mod routes;
pub mod service;
pub mod state;

pub use cli::Cli;
pub use config::{ModelSettings, ScorerKind, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
