//! osintdeck Common Library
//!
//! Shared code for the osintdeck services including:
//! - Query classification and finding synthesis
//! - Dashboard state and its reducer
//! - Keyword watchlist and public records archive
//! - Access gate
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod archive;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod metrics;
pub mod search;
pub mod watchlist;

// Re-export commonly used types
pub use auth::AccessGate;
pub use config::AppConfig;
pub use dashboard::{Action, DashboardState, DashboardStore};
pub use errors::{AppError, Result};
pub use search::{classify, synthesize, Finding, QueryKind, SearchService, SourceFilter};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
