pub mod client;
pub mod config;
pub mod flow;

// Re-export commonly used types
pub use client::TrelloClient;
pub use config::Config;
