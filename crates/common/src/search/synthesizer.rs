//! Finding Synthesizer - Builds structured findings for a query
//!
//! Provides:
//! - The finding record handed to the dashboard
//! - Template expansion keyed on query shape and source filter
//! - Source filtering through the declarative rule table
//!
//! All decorative randomness is drawn from the caller's RNG, so a seeded
//! generator yields exactly reproducible output.

use super::classifier::{classify, QueryKind};
use super::sources::{rule_for, Category, SourceFilter};
use super::templates::{base_templates, filter_templates, TemplateContext};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A synthesized finding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    /// Unique within one synthesis call
    pub id: String,

    pub category: Category,

    pub title: String,

    pub description: String,

    /// Display name of the reporting source
    pub source_label: String,

    /// Fixed per template (0-100)
    pub confidence: u8,

    /// Age of the finding relative to synthesis time
    pub timestamp_offset_secs: i64,

    /// Synthesis time minus the offset
    pub detected_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,

    /// Open mapping of decorative fields
    #[serde(default)]
    pub attributes: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ProfileImage>,
}

/// Profile picture attached to a social finding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileImage {
    pub url: String,
    pub source: String,
    pub verified: bool,
    pub last_updated: DateTime<Utc>,
}

/// Reliability band for a confidence score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(confidence: u8) -> Self {
        match confidence {
            90.. => ConfidenceTier::High,
            70..=89 => ConfidenceTier::Medium,
            _ => ConfidenceTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High reliability",
            ConfidenceTier::Medium => "Medium reliability",
            ConfidenceTier::Low => "Low reliability",
        }
    }
}

impl Finding {
    /// Empty finding detected at `now`
    pub fn blank(id: impl Into<String>, category: Category, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            category,
            title: String::new(),
            description: String::new(),
            source_label: String::new(),
            confidence: 0,
            timestamp_offset_secs: 0,
            detected_at: now,
            external_link: None,
            attributes: Map::new(),
            profile_image: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn linked(mut self, url: impl Into<String>) -> Self {
        self.external_link = Some(url.into());
        self
    }

    /// Merge the entries of a JSON object into the attributes
    pub fn with_attributes(mut self, attributes: Value) -> Self {
        if let Value::Object(map) = attributes {
            self.attributes.extend(map);
        }
        self
    }

    pub fn with_profile_image(mut self, image: Option<ProfileImage>) -> Self {
        self.profile_image = image;
        self
    }

    /// Whether an attribute is present with a truthy value
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(is_truthy)
    }

    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Classify `query` and synthesize its findings
pub fn synthesize<R: Rng + ?Sized>(
    query: &str,
    filter: SourceFilter,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Finding> {
    synthesize_classified(query, classify(query), filter, rng, now)
}

/// Synthesize findings for an already classified query
///
/// Base templates come first, then filter-specific ones; filtering keeps
/// that order. With `SourceFilter::All` the base set is returned untouched.
pub fn synthesize_classified<R: Rng + ?Sized>(
    query: &str,
    kind: QueryKind,
    filter: SourceFilter,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Finding> {
    let mut ctx = TemplateContext::new(query, filter, rng, now);
    let mut findings = base_templates(&mut ctx, kind);

    if filter.is_all() {
        return findings;
    }

    findings.extend(filter_templates(&mut ctx));

    let rule = rule_for(filter);
    findings.retain(|finding| rule.matches(finding, kind));
    findings
}

/// Simulated profile picture for `query`
///
/// The image is picked from the query text; verification and freshness are
/// drawn from `rng`.
pub fn profile_image<R: Rng + ?Sized>(
    query: &str,
    platform: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> ProfileImage {
    let image_id = query.encode_utf16().map(u64::from).sum::<u64>() % 100;
    let max_age_ms = 30 * 24 * 60 * 60 * 1000_i64;
    let age_ms = (rng.gen::<f64>() * max_age_ms as f64) as i64;

    ProfileImage {
        url: format!(
            "https://images.unsplash.com/photo-{}?w=400&h=400&fit=crop&crop=face",
            1_500_000_000 + image_id
        ),
        source: platform.to_string(),
        verified: rng.gen_bool(0.7),
        last_updated: now - Duration::milliseconds(age_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-20T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn titles(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_email_with_all_returns_exact_base_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let findings = synthesize("test@example.com", SourceFilter::All, &mut rng, now());

        assert_eq!(
            titles(&findings),
            vec![
                "Profile found - test@example.com",
                "Web mentions - test@example.com",
                "Associated documents - test@example.com",
                "Social accounts - test@example.com",
                "Data leaks - test@example.com",
            ]
        );
        assert_eq!(
            findings[0].external_link.as_deref(),
            Some("https://linkedin.com/in/test")
        );
        assert!(findings.iter().all(|f| f.has_attribute("email")));
    }

    #[test]
    fn test_generic_with_facebook_keeps_only_social() {
        let mut rng = StdRng::seed_from_u64(2);
        let findings = synthesize("Jean Dupont", SourceFilter::Facebook, &mut rng, now());

        assert_eq!(findings.len(), 11);
        assert!(findings.iter().all(|f| f.category == Category::Social));

        let titles = titles(&findings);
        assert_eq!(titles[0], "Social profiles - Jean Dupont");
        assert!(titles.contains(&"About - Jean Dupont"));
        assert!(titles.contains(&"Timeline - Jean Dupont"));
        assert!(titles.contains(&"Friends - Jean Dupont"));

        // Facebook searches on a name carry a profile picture on the lead finding
        let image = findings[0].profile_image.as_ref().unwrap();
        assert_eq!(image.source, "Facebook");
        assert_eq!(findings[0].source_label, "Facebook Graph API");
    }

    #[test]
    fn test_all_filter_is_a_no_op() {
        let cases = [
            ("test@example.com", 5),
            ("+33 6 12 34 56 78", 4),
            ("192.168.1.1", 3),
            ("example.com", 3),
            ("Jean Dupont", 7),
        ];

        for (query, expected) in cases {
            let mut rng = StdRng::seed_from_u64(3);
            let findings = synthesize(query, SourceFilter::All, &mut rng, now());
            assert_eq!(findings.len(), expected, "query {query}");
        }
    }

    #[test]
    fn test_filter_specific_templates_are_appended_after_base() {
        let mut rng = StdRng::seed_from_u64(4);
        let findings = synthesize("Jean Dupont", SourceFilter::Breaches, &mut rng, now());

        // Base "Leaked data" first, then the breach-specific finding
        assert_eq!(
            titles(&findings),
            vec!["Leaked data - Jean Dupont", "Compromised data - Jean Dupont"]
        );
    }

    #[test]
    fn test_business_keeps_web_and_document() {
        let mut rng = StdRng::seed_from_u64(5);
        let findings = synthesize("TechCorp", SourceFilter::Business, &mut rng, now());

        assert!(findings
            .iter()
            .all(|f| matches!(f.category, Category::Web | Category::Document)));
        assert_eq!(
            findings.last().map(|f| f.title.as_str()),
            Some("Company registrations - TechCorp")
        );
    }

    #[test]
    fn test_email_filter_keeps_everything_for_email_queries() {
        let mut rng = StdRng::seed_from_u64(6);
        let findings = synthesize("test@example.com", SourceFilter::Email, &mut rng, now());
        assert_eq!(findings.len(), 5);

        let mut rng = StdRng::seed_from_u64(6);
        let findings = synthesize("Jean Dupont", SourceFilter::Email, &mut rng, now());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_filters_without_matches_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let findings = synthesize("8.8.8.8", SourceFilter::Images, &mut rng, now());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_ids_are_unique_within_a_call() {
        let mut rng = StdRng::seed_from_u64(8);
        let findings = synthesize("Jean Dupont", SourceFilter::Usernames, &mut rng, now());
        let ids: HashSet<_> = findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), findings.len());
    }

    #[test]
    fn test_detected_at_follows_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        for finding in synthesize("example.com", SourceFilter::All, &mut rng, now()) {
            assert_eq!(
                finding.detected_at,
                now() - Duration::seconds(finding.timestamp_offset_secs)
            );
        }
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let first = synthesize(
            "Jean Dupont",
            SourceFilter::Facebook,
            &mut StdRng::seed_from_u64(42),
            now(),
        );
        let second = synthesize(
            "Jean Dupont",
            SourceFilter::Facebook,
            &mut StdRng::seed_from_u64(42),
            now(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseeded_runs_share_structure() {
        let first = synthesize("Jean Dupont", SourceFilter::Facebook, &mut rand::thread_rng(), now());
        let second = synthesize("Jean Dupont", SourceFilter::Facebook, &mut rand::thread_rng(), now());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.confidence, b.confidence);
            let keys_a: Vec<_> = a.attributes.keys().collect();
            let keys_b: Vec<_> = b.attributes.keys().collect();
            assert_eq!(keys_a, keys_b);
        }
    }

    #[test]
    fn test_profile_image_url_depends_on_query_only() {
        let a = profile_image("abc", "Facebook", &mut StdRng::seed_from_u64(1), now());
        let b = profile_image("abc", "Instagram", &mut StdRng::seed_from_u64(99), now());

        // 'a' + 'b' + 'c' = 294, 294 % 100 = 94
        assert_eq!(
            a.url,
            "https://images.unsplash.com/photo-1500000094?w=400&h=400&fit=crop&crop=face"
        );
        assert_eq!(a.url, b.url);
        assert!(a.last_updated <= now());
        assert!(a.last_updated >= now() - Duration::days(30));
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(96), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(90), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(89), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(70), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(69), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::Low.label(), "Low reliability");
    }
}
