//! Tipos compartilhados do freshcard.

pub mod config;
pub mod errors;
pub mod payloads;

pub use config::Config;
pub use errors::{FreshcardError, FreshcardResult};
pub use payloads::{AuthorInfo, CardInput, CommunityMetrics, DashboardPayload, HistoryPoint, SearchMetrics};
