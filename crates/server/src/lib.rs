//! Channelcast server - serves podcast RSS feeds built from video channel pages.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::FeedServer;
