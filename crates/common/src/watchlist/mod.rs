//! Keyword watchlist for web surveillance
//!
//! Holds keyword alerts and the detections they produced. Edits go through
//! [`WatchlistAction`] so the dashboard reducer can apply them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Realtime,
    Hourly,
    Daily,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A monitored keyword
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordAlert {
    pub id: String,
    pub keyword: String,
    pub sources: Vec<String>,
    pub frequency: Frequency,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub alert_count: u32,
    pub sensitivity: Sensitivity,
}

/// A hit reported for a keyword alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub id: String,
    pub alert_id: String,
    pub keyword: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub sentiment: Sentiment,
    /// 0-100
    pub relevance: u8,
    pub detected_at: DateTime<Utc>,
}

/// Headline numbers for the surveillance overview
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistStats {
    pub active_keywords: usize,
    pub total_detections: usize,
    pub last_24h: usize,
}

/// Edits to the watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchlistAction {
    Add {
        id: String,
        keyword: String,
        sources: Vec<String>,
        frequency: Frequency,
        sensitivity: Sensitivity,
        at: DateTime<Utc>,
    },
    Toggle(String),
    Remove(String),
}

/// Sources offered when creating an alert
pub const DEFAULT_SOURCES: [&str; 3] = ["web", "social", "news"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Watchlist {
    pub alerts: Vec<KeywordAlert>,
    pub detections: Vec<Detection>,
}

impl Watchlist {
    /// Seed data shown on a fresh dashboard
    pub fn sample(now: DateTime<Utc>) -> Self {
        let days = Duration::days;
        let hours = Duration::hours;

        let alert = |id: &str,
                     keyword: &str,
                     sources: &[&str],
                     frequency,
                     status,
                     created: Duration,
                     triggered: Option<Duration>,
                     alert_count,
                     sensitivity| KeywordAlert {
            id: id.to_string(),
            keyword: keyword.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            frequency,
            status,
            created_at: now - created,
            last_triggered_at: triggered.map(|age| now - age),
            alert_count,
            sensitivity,
        };

        let alerts = vec![
            alert(
                "1",
                "cybersecurity",
                &["web", "news", "social"],
                Frequency::Realtime,
                AlertStatus::Active,
                days(7),
                Some(hours(2)),
                47,
                Sensitivity::High,
            ),
            alert(
                "2",
                "artificial intelligence",
                &["news", "blogs", "forums"],
                Frequency::Hourly,
                AlertStatus::Active,
                days(3),
                Some(Duration::minutes(45)),
                23,
                Sensitivity::Medium,
            ),
            alert(
                "3",
                "data breach",
                &["web", "news", "social", "forums"],
                Frequency::Realtime,
                AlertStatus::Paused,
                days(5),
                None,
                12,
                Sensitivity::High,
            ),
        ];

        let detection = |id: &str,
                         alert_id: &str,
                         keyword: &str,
                         title: &str,
                         source: &str,
                         url: &str,
                         sentiment,
                         relevance,
                         age: Duration| Detection {
            id: id.to_string(),
            alert_id: alert_id.to_string(),
            keyword: keyword.to_string(),
            title: title.to_string(),
            source: source.to_string(),
            url: url.to_string(),
            sentiment,
            relevance,
            detected_at: now - age,
        };

        let detections = vec![
            detection(
                "1",
                "1",
                "cybersecurity",
                "New security flaw discovered in banking systems",
                "IT Security Weekly",
                "https://itsecurityweekly.example/news/banking-flaw",
                Sentiment::Negative,
                95,
                hours(2),
            ),
            detection(
                "2",
                "2",
                "artificial intelligence",
                "AI is reshaping the healthcare sector",
                "Twitter",
                "https://twitter.com/user/status/1",
                Sentiment::Positive,
                87,
                Duration::minutes(45),
            ),
            detection(
                "3",
                "1",
                "cybersecurity",
                "Cybersecurity training: best practices",
                "IT Security Blog",
                "https://blog-it-security.example/training",
                Sentiment::Neutral,
                78,
                hours(4),
            ),
            detection(
                "4",
                "2",
                "artificial intelligence",
                "European Parliament debates AI ethics",
                "Euronews",
                "https://euronews.com/tech/ai-ethics-parliament",
                Sentiment::Neutral,
                92,
                hours(6),
            ),
        ];

        Self { alerts, detections }
    }

    pub fn alert(&self, id: &str) -> Option<&KeywordAlert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    /// Apply an edit, returning the updated watchlist
    pub fn apply(mut self, action: WatchlistAction) -> Self {
        match action {
            WatchlistAction::Add {
                id,
                keyword,
                sources,
                frequency,
                sensitivity,
                at,
            } => {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    return self;
                }

                self.alerts.push(KeywordAlert {
                    id,
                    keyword: keyword.to_string(),
                    sources,
                    frequency,
                    status: AlertStatus::Active,
                    created_at: at,
                    last_triggered_at: None,
                    alert_count: 0,
                    sensitivity,
                });
            }
            WatchlistAction::Toggle(id) => {
                if let Some(alert) = self.alerts.iter_mut().find(|alert| alert.id == id) {
                    alert.status = match alert.status {
                        AlertStatus::Active => AlertStatus::Paused,
                        _ => AlertStatus::Active,
                    };
                }
            }
            WatchlistAction::Remove(id) => {
                self.alerts.retain(|alert| alert.id != id);
                self.detections.retain(|detection| detection.alert_id != id);
            }
        }

        self
    }

    pub fn stats(&self, now: DateTime<Utc>) -> WatchlistStats {
        let cutoff = now - Duration::hours(24);

        WatchlistStats {
            active_keywords: self
                .alerts
                .iter()
                .filter(|alert| alert.status == AlertStatus::Active)
                .count(),
            total_detections: self.detections.len(),
            last_24h: self
                .detections
                .iter()
                .filter(|detection| detection.detected_at > cutoff)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-20T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn add(id: &str, keyword: &str) -> WatchlistAction {
        WatchlistAction::Add {
            id: id.to_string(),
            keyword: keyword.to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            frequency: Frequency::default(),
            sensitivity: Sensitivity::default(),
            at: now(),
        }
    }

    #[test]
    fn test_sample_contents() {
        let watchlist = Watchlist::sample(now());
        assert_eq!(watchlist.alerts.len(), 3);
        assert_eq!(watchlist.detections.len(), 4);
        assert_eq!(watchlist.alert("3").unwrap().status, AlertStatus::Paused);
        assert!(watchlist.alert("3").unwrap().last_triggered_at.is_none());
    }

    #[test]
    fn test_add_trims_and_activates() {
        let watchlist = Watchlist::default().apply(add("42", "  ransomware  "));

        let alert = watchlist.alert("42").unwrap();
        assert_eq!(alert.keyword, "ransomware");
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(alert.alert_count, 0);
        assert_eq!(alert.created_at, now());
    }

    #[test]
    fn test_blank_keyword_is_ignored() {
        let watchlist = Watchlist::sample(now()).apply(add("42", "   "));
        assert_eq!(watchlist.alerts.len(), 3);
        assert!(watchlist.alert("42").is_none());
    }

    #[test]
    fn test_toggle_flips_between_active_and_paused() {
        let watchlist = Watchlist::sample(now()).apply(WatchlistAction::Toggle("1".into()));
        assert_eq!(watchlist.alert("1").unwrap().status, AlertStatus::Paused);

        let watchlist = watchlist.apply(WatchlistAction::Toggle("1".into()));
        assert_eq!(watchlist.alert("1").unwrap().status, AlertStatus::Active);
    }

    #[test]
    fn test_toggle_reactivates_stopped_alerts() {
        let mut watchlist = Watchlist::sample(now());
        watchlist.alerts[0].status = AlertStatus::Stopped;

        let watchlist = watchlist.apply(WatchlistAction::Toggle("1".into()));
        assert_eq!(watchlist.alert("1").unwrap().status, AlertStatus::Active);
    }

    #[test]
    fn test_remove_cascades_to_detections() {
        let watchlist = Watchlist::sample(now()).apply(WatchlistAction::Remove("1".into()));

        assert!(watchlist.alert("1").is_none());
        assert_eq!(watchlist.detections.len(), 2);
        assert!(watchlist.detections.iter().all(|d| d.alert_id != "1"));
    }

    #[test]
    fn test_unknown_ids_change_nothing() {
        let before = Watchlist::sample(now());
        let after = before
            .clone()
            .apply(WatchlistAction::Toggle("missing".into()))
            .apply(WatchlistAction::Remove("missing".into()));
        assert_eq!(before, after);
    }

    #[test]
    fn test_stats() {
        let stats = Watchlist::sample(now()).stats(now());
        assert_eq!(
            stats,
            WatchlistStats {
                active_keywords: 2,
                total_detections: 4,
                last_24h: 4,
            }
        );

        let later = now() + Duration::days(2);
        assert_eq!(Watchlist::sample(now()).stats(later).last_24h, 0);
    }
}
