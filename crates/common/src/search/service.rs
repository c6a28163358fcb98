//! Search Service - Guards input, paces the response and runs synthesis

use super::classifier::{classify, QueryKind};
use super::sources::SourceFilter;
use super::synthesizer::{synthesize_classified, Finding};
use crate::config::SearchConfig;
use crate::errors::{AppError, Result};
use crate::metrics;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

/// Search request as submitted by the dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    pub query: String,

    #[serde(default)]
    pub source: SourceFilter,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, source: SourceFilter) -> Self {
        Self {
            query: query.into(),
            source,
        }
    }
}

/// Outcome of one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub search_id: Uuid,
    pub query: String,
    pub kind: QueryKind,
    pub source: SourceFilter,
    pub source_label: String,
    pub total: usize,
    pub findings: Vec<Finding>,
    pub completed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// Search service shared by request handlers
pub struct SearchService {
    config: SearchConfig,
    rng: Mutex<StdRng>,
}

impl SearchService {
    /// Create a new search service
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Reject queries synthesis must never see: blank or oversized
    pub fn guard<'q>(&self, query: &'q str) -> Result<&'q str> {
        if query.trim().is_empty() {
            return Err(AppError::missing("query"));
        }

        let length = query.chars().count();
        if length > self.config.max_query_length {
            return Err(AppError::Validation {
                message: format!(
                    "query is {} characters, limit is {}",
                    length, self.config.max_query_length
                ),
                field: Some("query".to_string()),
            });
        }

        Ok(query)
    }

    /// Run a search after the configured simulated latency
    pub async fn search(&self, request: SearchRequest) -> Result<SearchReport> {
        self.search_as(Uuid::new_v4(), request).await
    }

    /// Run a search under an id chosen by the caller
    pub async fn search_as(&self, search_id: Uuid, request: SearchRequest) -> Result<SearchReport> {
        let start = Instant::now();
        self.guard(&request.query)?;
        request.validate()?;

        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.run(search_id, &request.query, request.source, start)
    }

    /// Run a search immediately
    pub fn search_now(&self, query: &str, source: SourceFilter) -> Result<SearchReport> {
        let start = Instant::now();
        self.guard(query)?;
        self.run(Uuid::new_v4(), query, source, start)
    }

    fn run(
        &self,
        search_id: Uuid,
        query: &str,
        source: SourceFilter,
        start: Instant,
    ) -> Result<SearchReport> {
        let kind = classify(query);
        let now = Utc::now();

        let findings = {
            let mut rng = self.rng.lock().map_err(|_| AppError::Internal {
                message: "search rng lock poisoned".to_string(),
            })?;
            synthesize_classified(query, kind, source, &mut *rng, now)
        };

        let processing_time_ms = start.elapsed().as_millis() as u64;

        metrics::record_search(
            start.elapsed().as_secs_f64(),
            source.id(),
            kind.as_str(),
            findings.len(),
        );

        tracing::info!(
            kind = %kind,
            source = %source,
            findings = findings.len(),
            latency_ms = processing_time_ms,
            "Search completed"
        );

        Ok(SearchReport {
            search_id,
            query: query.to_string(),
            kind,
            source,
            source_label: source.source_label().to_string(),
            total: findings.len(),
            findings,
            completed_at: now,
            processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Category;

    fn service() -> SearchService {
        SearchService::new(SearchConfig::immediate(7))
    }

    #[test]
    fn test_blank_queries_are_refused() {
        let service = service();
        for query in ["", "   ", "\t\n"] {
            let err = service.search_now(query, SourceFilter::All).unwrap_err();
            assert!(matches!(err, AppError::MissingField { ref field } if field == "query"));
        }
    }

    #[test]
    fn test_oversized_queries_are_refused() {
        let service = SearchService::new(SearchConfig {
            max_query_length: 8,
            ..SearchConfig::immediate(1)
        });

        let err = service.guard("far too long a query").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(service.guard("short").is_ok());
    }

    #[tokio::test]
    async fn test_configured_length_limit_governs_search() {
        let service = SearchService::new(SearchConfig {
            max_query_length: 2000,
            ..SearchConfig::immediate(3)
        });

        let long = "a".repeat(1500);
        let report = service
            .search(SearchRequest::new(long.clone(), SourceFilter::All))
            .await
            .unwrap();
        assert_eq!(report.query, long);

        let err = service
            .search(SearchRequest::new("a".repeat(2001), SourceFilter::All))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref message, .. } if !message.contains("aaaa")));
    }

    #[tokio::test]
    async fn test_search_reports_classification_and_findings() {
        let report = service()
            .search(SearchRequest::new("test@example.com", SourceFilter::All))
            .await
            .unwrap();

        assert_eq!(report.kind, QueryKind::Email);
        assert_eq!(report.total, 5);
        assert_eq!(report.findings.len(), report.total);
        assert_eq!(report.source_label, "Multi-Source Aggregator");
    }

    #[tokio::test]
    async fn test_search_with_facebook_filter() {
        let report = service()
            .search(SearchRequest::new("Jean Dupont", SourceFilter::Facebook))
            .await
            .unwrap();

        assert_eq!(report.kind, QueryKind::GenericTerm);
        assert_eq!(report.total, 11);
        assert!(report.findings.iter().all(|f| f.category == Category::Social));
    }

    #[tokio::test]
    async fn test_search_as_keeps_caller_id() {
        let id = Uuid::new_v4();
        let report = service()
            .search_as(id, SearchRequest::new("8.8.8.8", SourceFilter::Ip))
            .await
            .unwrap();

        assert_eq!(report.search_id, id);
        assert_eq!(report.kind, QueryKind::IpAddress);
    }

    #[test]
    fn test_same_seed_same_findings() {
        let a = service().search_now("Jean Dupont", SourceFilter::Facebook).unwrap();
        let b = service().search_now("Jean Dupont", SourceFilter::Facebook).unwrap();

        let attrs = |r: &SearchReport| -> Vec<_> {
            r.findings.iter().map(|f| f.attributes.clone()).collect()
        };
        assert_eq!(attrs(&a), attrs(&b));
    }

    #[test]
    fn test_request_deserializes_unknown_source_as_all() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"query": "x", "source": "smoke-signals"}"#).unwrap();
        assert_eq!(request.source, SourceFilter::All);

        let request: SearchRequest = serde_json::from_str(r#"{"query": "x"}"#).unwrap();
        assert_eq!(request.source, SourceFilter::All);
    }
}
