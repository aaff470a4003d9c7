pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::WatsonxClient;
pub use api::{build_router, AppState};
pub use config::{ScoringConfig, ServiceConfig};
pub use core::{scoring::ScoringEngine, strategy::StrategyEngine};
pub use utils::error::{ArchitectError, Result};
