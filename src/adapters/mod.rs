// Adapters layer: concrete implementations for external systems.

pub mod watsonx;

pub use watsonx::WatsonxClient;
