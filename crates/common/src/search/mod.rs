//! Search Module Core Components
//!
//! The search module turns a free-text query into simulated findings:
//! - Query shape classification
//! - Source filter catalogue and filter rules
//! - Template-based finding synthesis
//! - Service wrapper with input guard and simulated latency

mod classifier;
mod service;
mod sources;
mod synthesizer;
mod templates;

pub use classifier::{classify, QueryKind};
pub use service::{SearchReport, SearchRequest, SearchService};
pub use sources::{rule_for, Category, FilterRule, SourceFilter, FILTER_RULES};
pub use synthesizer::{
    profile_image, synthesize, synthesize_classified, ConfidenceTier, Finding, ProfileImage,
};
