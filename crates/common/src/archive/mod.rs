//! Public records archive
//!
//! A read-only catalogue of records sources and the records they hold,
//! searched by free text with optional category and source restrictions.

use crate::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Record categories, in display order
pub const CATEGORIES: [&str; 10] = [
    "People",
    "Companies",
    "Official documents",
    "Public registers",
    "Academic publications",
    "Patents",
    "Intellectual property",
    "Geographic data",
    "Statistics",
    "Historical archives",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Public,
    Government,
    Commercial,
    Academic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Online,
    Offline,
    Maintenance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Restricted,
    Classified,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveSource {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
    pub status: SourceStatus,
    pub description: String,
    pub record_count: u64,
    pub access_level: AccessLevel,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveRecord {
    pub id: String,
    pub source_id: String,
    pub source_name: String,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub confidence: u8,
    pub access_level: AccessLevel,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ArchiveRecord {
    fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Archive search parameters; `"all"` or absent means unrestricted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveQuery {
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
}

fn restriction(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != "all")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Archive {
    pub sources: Vec<ArchiveSource>,
    pub records: Vec<ArchiveRecord>,
}

impl Archive {
    pub fn sample() -> Self {
        let source = |id: &str,
                      name: &str,
                      kind,
                      status,
                      description: &str,
                      record_count,
                      access_level,
                      categories: &[&str],
                      api_endpoint: Option<&str>| ArchiveSource {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            status,
            description: description.to_string(),
            record_count,
            access_level,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            api_endpoint: api_endpoint.map(str::to_string),
        };

        let sources = vec![
            source(
                "1",
                "Trade and Companies Register",
                SourceKind::Government,
                SourceStatus::Online,
                "Official register of incorporated companies",
                4_250_000,
                AccessLevel::Public,
                &["Companies", "Public registers"],
                Some("https://api.infogreffe.fr"),
            ),
            source(
                "2",
                "Official Journal",
                SourceKind::Government,
                SourceStatus::Online,
                "Official government publications",
                890_000,
                AccessLevel::Public,
                &["Official documents", "Historical archives"],
                None,
            ),
            source(
                "3",
                "Patent Office Database",
                SourceKind::Government,
                SourceStatus::Online,
                "Patents and trademarks",
                1_200_000,
                AccessLevel::Public,
                &["Patents", "Intellectual property"],
                None,
            ),
            source(
                "4",
                "Open Research Archive",
                SourceKind::Academic,
                SourceStatus::Online,
                "Multidisciplinary open archive",
                3_100_000,
                AccessLevel::Public,
                &["Academic publications", "Official documents"],
                None,
            ),
            source(
                "5",
                "Business Identification Directory",
                SourceKind::Government,
                SourceStatus::Maintenance,
                "Business and establishment identification directory",
                28_000_000,
                AccessLevel::Public,
                &["Companies", "Statistics"],
                None,
            ),
            source(
                "6",
                "National Archives",
                SourceKind::Government,
                SourceStatus::Online,
                "Digitised historical archives",
                750_000,
                AccessLevel::Restricted,
                &["Historical archives", "Official documents"],
                None,
            ),
        ];

        let records = vec![
            ArchiveRecord {
                id: "1".to_string(),
                source_id: "1".to_string(),
                source_name: "Trade and Companies Register".to_string(),
                title: "TECH INNOVATIONS SAS".to_string(),
                content: "Simplified joint-stock company with share capital of EUR 100,000. \
                          Main activity: software development."
                    .to_string(),
                category: "Companies".to_string(),
                author: Some("Commercial Court Registry".to_string()),
                location: Some("Paris".to_string()),
                tags: tags(&["SAS", "Technology", "Software"]),
                confidence: 95,
                access_level: AccessLevel::Public,
                metadata: object(json!({
                    "siret": "12345678901234",
                    "capital": "100000 EUR",
                    "director": "Jean MARTIN",
                    "address": "123 Rue de la Tech, 75001 Paris",
                })),
            },
            ArchiveRecord {
                id: "2".to_string(),
                source_id: "2".to_string(),
                source_name: "Official Journal".to_string(),
                title: "Decree 2024-001 on cybersecurity".to_string(),
                content: "Decree on information security measures in public administrations."
                    .to_string(),
                category: "Official documents".to_string(),
                author: Some("Ministry of the Interior".to_string()),
                location: None,
                tags: tags(&["Cybersecurity", "Administration", "Decree"]),
                confidence: 98,
                access_level: AccessLevel::Public,
                metadata: object(json!({
                    "number": "2024-001",
                    "published_on": "2024-01-15",
                    "ministry": "Interior",
                })),
            },
            ArchiveRecord {
                id: "3".to_string(),
                source_id: "3".to_string(),
                source_name: "Patent Office Database".to_string(),
                title: "Patent FR3098765 - Artificial intelligence system".to_string(),
                content: "Method and device for analysing data with artificial intelligence \
                          to detect anomalies."
                    .to_string(),
                category: "Patents".to_string(),
                author: Some("TECH INNOVATIONS SAS".to_string()),
                location: None,
                tags: tags(&["AI", "Patent", "Data analysis"]),
                confidence: 92,
                access_level: AccessLevel::Public,
                metadata: object(json!({
                    "patent_number": "FR3098765",
                    "filed_on": "2023-12-01",
                    "inventor": "Marie DUBOIS",
                    "international_class": "G06N",
                })),
            },
        ];

        Self { sources, records }
    }

    pub fn source(&self, id: &str) -> Option<&ArchiveSource> {
        self.sources.iter().find(|source| source.id == id)
    }

    /// Records matching the query, in archive order
    pub fn search(&self, query: &ArchiveQuery) -> Result<Vec<&ArchiveRecord>> {
        if query.text.trim().is_empty() {
            return Err(AppError::missing("text"));
        }
        let needle = query.text.to_lowercase();

        let category = restriction(&query.category);
        let source_id = restriction(&query.source_id);

        Ok(self
            .records
            .iter()
            .filter(|record| record.mentions(&needle))
            .filter(|record| category.map_or(true, |c| record.category == c))
            .filter(|record| source_id.map_or(true, |s| record.source_id == s))
            .collect())
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
