//! Source filters - which sources a search targets and which findings survive
//!
//! Every filter identifier maps to a display label for findings that take
//! their source from the filter, and to a [`FilterRule`] in [`FILTER_RULES`].

use super::classifier::QueryKind;
use super::synthesizer::Finding;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Social,
    Web,
    Document,
    Image,
    Person,
    Location,
}

/// Requested source type for a search
///
/// Unknown identifiers parse as [`SourceFilter::All`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SourceFilter {
    #[default]
    All,
    Social,
    Web,
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
    Communities,
    Email,
    Phone,
    Domains,
    Ip,
    Documents,
    Images,
    Maps,
    Person,
    Usernames,
    Names,
    Addresses,
    Pastes,
    Videos,
    Business,
    Vehicles,
    Crypto,
    Breaches,
    Audio,
    VideoLive,
    Apis,
}

impl SourceFilter {
    /// Every filter, in catalogue order
    pub const ALL: [SourceFilter; 28] = [
        SourceFilter::All,
        SourceFilter::Social,
        SourceFilter::Web,
        SourceFilter::Facebook,
        SourceFilter::Twitter,
        SourceFilter::Instagram,
        SourceFilter::Linkedin,
        SourceFilter::Communities,
        SourceFilter::Email,
        SourceFilter::Phone,
        SourceFilter::Domains,
        SourceFilter::Ip,
        SourceFilter::Documents,
        SourceFilter::Images,
        SourceFilter::Maps,
        SourceFilter::Person,
        SourceFilter::Usernames,
        SourceFilter::Names,
        SourceFilter::Addresses,
        SourceFilter::Pastes,
        SourceFilter::Videos,
        SourceFilter::Business,
        SourceFilter::Vehicles,
        SourceFilter::Crypto,
        SourceFilter::Breaches,
        SourceFilter::Audio,
        SourceFilter::VideoLive,
        SourceFilter::Apis,
    ];

    /// Parse a filter identifier; anything unrecognised means `All`
    pub fn parse(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|filter| filter.id() == id)
            .unwrap_or(SourceFilter::All)
    }

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            SourceFilter::All => "all",
            SourceFilter::Social => "social",
            SourceFilter::Web => "web",
            SourceFilter::Facebook => "facebook",
            SourceFilter::Twitter => "twitter",
            SourceFilter::Instagram => "instagram",
            SourceFilter::Linkedin => "linkedin",
            SourceFilter::Communities => "communities",
            SourceFilter::Email => "email",
            SourceFilter::Phone => "phone",
            SourceFilter::Domains => "domains",
            SourceFilter::Ip => "ip",
            SourceFilter::Documents => "documents",
            SourceFilter::Images => "images",
            SourceFilter::Maps => "maps",
            SourceFilter::Person => "person",
            SourceFilter::Usernames => "usernames",
            SourceFilter::Names => "names",
            SourceFilter::Addresses => "addresses",
            SourceFilter::Pastes => "pastes",
            SourceFilter::Videos => "videos",
            SourceFilter::Business => "business",
            SourceFilter::Vehicles => "vehicles",
            SourceFilter::Crypto => "crypto",
            SourceFilter::Breaches => "breaches",
            SourceFilter::Audio => "audio",
            SourceFilter::VideoLive => "video_live",
            SourceFilter::Apis => "apis",
        }
    }

    /// Source label for findings whose source follows the filter
    pub fn source_label(&self) -> &'static str {
        match self {
            SourceFilter::Facebook => "Facebook Graph API",
            SourceFilter::Twitter => "X (Twitter) API",
            SourceFilter::Instagram => "Instagram Basic Display API",
            SourceFilter::Linkedin => "LinkedIn API",
            SourceFilter::Communities => "Community Forums Scraper",
            SourceFilter::Email => "Email Intelligence",
            SourceFilter::Usernames => "Username Search Engine",
            SourceFilter::Names => "People Search Database",
            SourceFilter::Addresses => "Address Verification Service",
            SourceFilter::Phone => "Telecom Database",
            SourceFilter::Maps => "Geospatial Intelligence",
            SourceFilter::Documents => "Document Analysis Engine",
            SourceFilter::Pastes => "Pastebin Monitor",
            SourceFilter::Images => "Reverse Image Search",
            SourceFilter::Videos => "Video Analysis Platform",
            SourceFilter::Domains => "Domain Intelligence",
            SourceFilter::Ip => "IP Geolocation Service",
            SourceFilter::Business => "Business Registry Database",
            SourceFilter::Vehicles => "Vehicle Registration DB",
            SourceFilter::Crypto => "Blockchain Explorer",
            SourceFilter::Breaches => "Breach Database Monitor",
            SourceFilter::Audio => "Audio Stream Monitor",
            SourceFilter::VideoLive => "Live Stream Tracker",
            SourceFilter::Apis => "API Intelligence Platform",
            SourceFilter::All
            | SourceFilter::Social
            | SourceFilter::Web
            | SourceFilter::Person => "Multi-Source Aggregator",
        }
    }

    pub fn is_all(&self) -> bool {
        *self == SourceFilter::All
    }
}

impl From<String> for SourceFilter {
    fn from(id: String) -> Self {
        SourceFilter::parse(&id)
    }
}

impl From<&str> for SourceFilter {
    fn from(id: &str) -> Self {
        SourceFilter::parse(id)
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Predicate deciding whether a finding survives a source filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Keep every finding
    Everything,
    /// Keep findings in any of these categories
    Categories(&'static [Category]),
    /// Keep every finding when the query has this shape, otherwise only
    /// findings carrying a truthy attribute
    KindOrAttribute {
        kind: QueryKind,
        attribute: &'static str,
    },
    /// Keep findings carrying a truthy attribute
    Attribute(&'static str),
}

impl FilterRule {
    pub fn matches(&self, finding: &Finding, kind: QueryKind) -> bool {
        match self {
            FilterRule::Everything => true,
            FilterRule::Categories(categories) => categories.contains(&finding.category),
            FilterRule::KindOrAttribute {
                kind: wanted,
                attribute,
            } => *wanted == kind || finding.has_attribute(attribute),
            FilterRule::Attribute(attribute) => finding.has_attribute(attribute),
        }
    }
}

const SOCIAL: &[Category] = &[Category::Social];
const WEB: &[Category] = &[Category::Web];
const DOCUMENT: &[Category] = &[Category::Document];
const IMAGE: &[Category] = &[Category::Image];
const LOCATION: &[Category] = &[Category::Location];
const PERSON: &[Category] = &[Category::Person];

/// Filter to rule table
pub const FILTER_RULES: &[(SourceFilter, FilterRule)] = &[
    (SourceFilter::All, FilterRule::Everything),
    (SourceFilter::Facebook, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Twitter, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Instagram, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Linkedin, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Communities, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Social, FilterRule::Categories(SOCIAL)),
    (SourceFilter::Web, FilterRule::Categories(WEB)),
    (
        SourceFilter::Email,
        FilterRule::KindOrAttribute {
            kind: QueryKind::Email,
            attribute: "email",
        },
    ),
    (
        SourceFilter::Phone,
        FilterRule::KindOrAttribute {
            kind: QueryKind::Phone,
            attribute: "phone",
        },
    ),
    (
        SourceFilter::Domains,
        FilterRule::KindOrAttribute {
            kind: QueryKind::Domain,
            attribute: "domain",
        },
    ),
    (
        SourceFilter::Ip,
        FilterRule::KindOrAttribute {
            kind: QueryKind::IpAddress,
            attribute: "ip",
        },
    ),
    (SourceFilter::Documents, FilterRule::Categories(DOCUMENT)),
    (SourceFilter::Images, FilterRule::Categories(IMAGE)),
    (SourceFilter::Maps, FilterRule::Categories(LOCATION)),
    (SourceFilter::Person, FilterRule::Categories(PERSON)),
    (
        SourceFilter::Usernames,
        FilterRule::Categories(&[Category::Social, Category::Web]),
    ),
    (
        SourceFilter::Names,
        FilterRule::Categories(&[Category::Person, Category::Social]),
    ),
    (SourceFilter::Addresses, FilterRule::Categories(LOCATION)),
    (SourceFilter::Pastes, FilterRule::Categories(DOCUMENT)),
    // Videos are treated as image media
    (SourceFilter::Videos, FilterRule::Categories(IMAGE)),
    (
        SourceFilter::Business,
        FilterRule::Categories(&[Category::Web, Category::Document]),
    ),
    (SourceFilter::Vehicles, FilterRule::Categories(WEB)),
    (SourceFilter::Crypto, FilterRule::Categories(WEB)),
    (SourceFilter::Breaches, FilterRule::Attribute("breaches")),
    (SourceFilter::Audio, FilterRule::Categories(WEB)),
    (SourceFilter::VideoLive, FilterRule::Categories(WEB)),
    (SourceFilter::Apis, FilterRule::Categories(WEB)),
];

/// Look up the rule for a filter; filters without an entry keep everything
pub fn rule_for(filter: SourceFilter) -> FilterRule {
    FILTER_RULES
        .iter()
        .find(|(candidate, _)| *candidate == filter)
        .map(|(_, rule)| *rule)
        .unwrap_or(FilterRule::Everything)
}
