pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::GeminiClient;
pub use app::Marketplace;
pub use config::TomlConfig;
pub use crate::core::{
    assistant::AiAssistant, booking::BookingService, listing_repo::InMemoryListingRepository,
};
pub use utils::error::{HomestayError, Result};
