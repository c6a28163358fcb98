//! Finding templates for each query shape and for the sources that add
//! their own findings

use super::classifier::{QueryKind, WHITESPACE};
use super::sources::{Category, SourceFilter};
use super::synthesizer::{profile_image, Finding};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use regex_lite::Regex;
use serde_json::json;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[{WHITESPACE}]+")).expect("whitespace pattern compiles")
});

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;

/// Where a template takes its source label from
#[derive(Debug, Clone, Copy)]
enum Source {
    /// The requested filter's label
    Filter,
    Fixed(&'static str),
}

/// State shared by all templates of one synthesis call
pub(crate) struct TemplateContext<'a, R: ?Sized> {
    query: &'a str,
    filter: SourceFilter,
    now: DateTime<Utc>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> TemplateContext<'a, R> {
    pub(crate) fn new(query: &'a str, filter: SourceFilter, rng: &'a mut R, now: DateTime<Utc>) -> Self {
        Self {
            query,
            filter,
            now,
            rng,
        }
    }

    fn finding(
        &self,
        id: impl Into<String>,
        category: Category,
        heading: &str,
        source: Source,
        confidence: u8,
        age_secs: i64,
    ) -> Finding {
        let source_label = match source {
            Source::Filter => self.filter.source_label(),
            Source::Fixed(label) => label,
        };

        Finding {
            title: format!("{} - {}", heading, self.query),
            source_label: source_label.to_string(),
            confidence,
            timestamp_offset_secs: age_secs,
            detected_at: self.now - Duration::seconds(age_secs),
            ..Finding::blank(id, category, self.now)
        }
    }

    /// Uniform integer in `low..low + span`
    fn count(&mut self, low: u64, span: u64) -> u64 {
        self.rng.gen_range(low..low + span)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Id for a filter-specific finding, unique alongside the numbered base ids
    fn extra_id(&self, suffix: &str) -> String {
        format!("{}_{}", self.now.timestamp_millis(), suffix)
    }

    /// Finding contributed by the requested source rather than the query shape
    fn extra(
        &self,
        suffix: &str,
        category: Category,
        heading: &str,
        source: &'static str,
        confidence: u8,
        age_secs: i64,
    ) -> Finding {
        self.finding(
            self.extra_id(suffix),
            category,
            heading,
            Source::Fixed(source),
            confidence,
            age_secs,
        )
    }

    /// Lowercased query with whitespace runs replaced by `sep`
    fn slug(&self, sep: &str) -> String {
        WHITESPACE_RUN
            .replace_all(&self.query.to_lowercase(), regex_lite::NoExpand(sep))
            .into_owned()
    }
}

/// Base findings for a query shape
pub(crate) fn base_templates<R: Rng + ?Sized>(
    ctx: &mut TemplateContext<'_, R>,
    kind: QueryKind,
) -> Vec<Finding> {
    match kind {
        QueryKind::Email => email(ctx),
        QueryKind::Phone => phone(ctx),
        QueryKind::IpAddress => ip_address(ctx),
        QueryKind::Domain => domain(ctx),
        QueryKind::GenericTerm => generic_term(ctx),
    }
}

/// Extra findings contributed by the requested source
pub(crate) fn filter_templates<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    match ctx.filter {
        SourceFilter::Facebook => facebook(ctx),
        SourceFilter::Twitter => twitter(ctx),
        SourceFilter::Instagram => instagram(ctx),
        SourceFilter::Linkedin => linkedin(ctx),
        SourceFilter::Breaches => breaches(ctx),
        SourceFilter::Crypto => crypto(ctx),
        SourceFilter::Vehicles => vehicles(ctx),
        SourceFilter::Business => business(ctx),
        _ => Vec::new(),
    }
}

fn email<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;
    let local_part = q.split('@').next().unwrap_or_default();
    let connections = ctx.count(100, 500);
    let databases = ctx.count(1, 5);
    let documents = ctx.count(1, 10);
    let image = profile_image(q, "Instagram", &mut *ctx.rng, ctx.now);

    vec![
        ctx.finding("1", Category::Social, "Profile found", Source::Filter, 92, 2 * HOUR)
            .described(format!("Professional account associated with the email {q}"))
            .linked(format!("https://linkedin.com/in/{local_part}"))
            .with_attributes(json!({
                "email": q,
                "verified": true,
                "connections": connections,
                "industry": "Technology",
            })),
        ctx.finding("2", Category::Web, "Web mentions", Source::Filter, 85, 6 * HOUR)
            .described(format!("Email found in {databases} public databases"))
            .with_attributes(json!({
                "email": q,
                "sources": ["GitHub", "Stack Overflow", "Company Directory"],
                "last_seen": "2024-01-15",
            })),
        ctx.finding("3", Category::Document, "Associated documents", Source::Filter, 78, 12 * HOUR)
            .described("Email mentioned in PDF documents and presentations")
            .with_attributes(json!({
                "email": q,
                "document_types": ["PDF", "DOCX", "PPTX"],
                "total_documents": documents,
            })),
        ctx.finding(
            "4",
            Category::Social,
            "Social accounts",
            Source::Fixed("Social Media Aggregator"),
            73,
            18 * HOUR,
        )
        .described(format!("Facebook and Instagram profiles associated with {q}"))
        .with_profile_image(Some(image))
        .with_attributes(json!({
            "email": q,
            "platforms": ["Facebook", "Instagram", "Twitter"],
            "profiles_found": 3,
        })),
        ctx.finding(
            "5",
            Category::Web,
            "Data leaks",
            Source::Fixed("Breach Database Monitor"),
            89,
            24 * HOUR,
        )
        .described("Email found in compromised databases")
        .with_attributes(json!({
            "email": q,
            "breaches": ["LinkedIn 2021", "Adobe 2019"],
            "risk_level": "Medium",
        })),
    ]
}

fn phone<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;

    vec![
        ctx.finding("1", Category::Person, "Owner", Source::Filter, 94, HOUR)
            .described("Number registered to a private individual")
            .with_attributes(json!({
                "phone": q,
                "operator": "Orange",
                "line_type": "Mobile",
                "region": "Île-de-France",
            })),
        ctx.finding("2", Category::Location, "Approximate location", Source::Filter, 76, 3 * HOUR)
            .described("Geographic area associated with the number")
            .with_attributes(json!({
                "phone": q,
                "city": "Paris",
                "region": "Île-de-France",
                "country": "France",
            })),
        ctx.finding(
            "3",
            Category::Social,
            "Linked accounts",
            Source::Fixed("Social Phone Lookup"),
            68,
            8 * HOUR,
        )
        .described("Social profiles associated with this number")
        .with_attributes(json!({
            "phone": q,
            "platforms": ["WhatsApp", "Telegram", "Signal"],
            "verified": true,
        })),
        ctx.finding(
            "4",
            Category::Web,
            "Public directories",
            Source::Fixed("Public Directory Search"),
            82,
            15 * HOUR,
        )
        .described("Number found in online directories")
        .with_attributes(json!({
            "phone": q,
            "directories": ["Pages Jaunes", "Annuaire Inversé"],
            "business_listing": false,
        })),
    ]
}

fn ip_address<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;

    vec![
        ctx.finding(
            "1",
            Category::Location,
            "IP geolocation",
            Source::Fixed("IP Geolocation Service"),
            91,
            30 * MINUTE,
        )
        .described("Geographic location of the IP address")
        .with_attributes(json!({
            "ip": q,
            "country": "France",
            "city": "Lyon",
            "isp": "Free SAS",
            "organization": "Free SAS",
        })),
        ctx.finding(
            "2",
            Category::Web,
            "Network information",
            Source::Fixed("Network Intelligence"),
            95,
            45 * MINUTE,
        )
        .described("Technical details about the IP address")
        .with_attributes(json!({
            "ip": q,
            "network_type": "Residential",
            "asn": "AS12322",
            "threat_level": "Low",
        })),
        ctx.finding(
            "3",
            Category::Web,
            "Threat history",
            Source::Fixed("Threat Intelligence Platform"),
            77,
            2 * HOUR,
        )
        .described("Malicious activity associated with this IP")
        .with_attributes(json!({
            "ip": q,
            "threats": ["None detected"],
            "last_scan": "2024-01-20",
            "reputation": "Clean",
        })),
    ]
}

fn domain<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;

    vec![
        ctx.finding(
            "1",
            Category::Web,
            "WHOIS information",
            Source::Fixed("Domain Intelligence"),
            96,
            HOUR,
        )
        .described("Domain registration data")
        .with_attributes(json!({
            "domain": q,
            "registrar": "OVH",
            "created": "2020-03-15",
            "expires": "2025-03-15",
        })),
        ctx.finding(
            "2",
            Category::Web,
            "Subdomains",
            Source::Fixed("Subdomain Scanner"),
            88,
            3 * HOUR,
        )
        .described(format!("Subdomains discovered for {q}"))
        .with_attributes(json!({
            "domain": q,
            "subdomains": ["www", "mail", "ftp", "admin"],
            "total_found": 12,
        })),
        ctx.finding(
            "3",
            Category::Web,
            "SSL certificates",
            Source::Fixed("Certificate Transparency"),
            92,
            5 * HOUR,
        )
        .described("Security certificates associated with the domain")
        .with_attributes(json!({
            "domain": q,
            "certificates": 3,
            "issuer": "Let's Encrypt",
            "valid_until": "2024-06-15",
        })),
    ]
}

fn generic_term<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;
    let on_facebook = ctx.filter == SourceFilter::Facebook;
    let image = on_facebook.then(|| profile_image(q, "Facebook", &mut *ctx.rng, ctx.now));
    let total_profiles = ctx.count(2, 8);
    let images_on_profile = if on_facebook { ctx.count(1, 5) } else { 0 };
    let total_mentions = ctx.count(5, 20);
    let relevance = ctx.count(70, 30);
    let images_found = ctx.count(3, 15);
    let record_matches = ctx.count(1, 5);
    let posts = ctx.count(5, 25);

    vec![
        ctx.finding("1", Category::Social, "Social profiles", Source::Filter, 88, 30 * MINUTE)
            .described("Accounts found across social platforms")
            .with_profile_image(image)
            .with_attributes(json!({
                "search_term": q,
                "platforms": ["Twitter", "Facebook", "Instagram"],
                "total_profiles": total_profiles,
                "images_found": images_on_profile,
            })),
        ctx.finding("2", Category::Web, "Web mentions", Source::Filter, 82, 2 * HOUR)
            .described("References found in articles, forums and websites")
            .with_attributes(json!({
                "search_term": q,
                "total_mentions": total_mentions,
                "top_domains": ["lemonde.fr", "reddit.com", "linkedin.com"],
            })),
        ctx.finding("3", Category::Document, "Public documents", Source::Filter, 75, 8 * HOUR)
            .described("Name or term found in official documents and publications")
            .with_attributes(json!({
                "search_term": q,
                "document_sources": ["Journal Officiel", "Academic publications", "Public reports"],
                "relevance_score": relevance,
            })),
        ctx.finding(
            "4",
            Category::Image,
            "Associated images",
            Source::Fixed("Reverse Image Search"),
            71,
            12 * HOUR,
        )
        .described(format!("Photos and images linked to {q}"))
        .with_attributes(json!({
            "search_term": q,
            "images_found": images_found,
            "sources": ["Google Images", "TinEye", "Yandex"],
        })),
        ctx.finding(
            "5",
            Category::Person,
            "Public records",
            Source::Fixed("Public Records Database"),
            86,
            18 * HOUR,
        )
        .described("Information found in official databases")
        .with_attributes(json!({
            "search_term": q,
            "record_types": ["Trade register", "Professional directories"],
            "matches": record_matches,
        })),
        ctx.finding(
            "6",
            Category::Web,
            "Forums and communities",
            Source::Fixed("Community Forums Scraper"),
            69,
            24 * HOUR,
        )
        .described("Activity on forums, Reddit and online communities")
        .with_attributes(json!({
            "search_term": q,
            "platforms": ["Reddit", "Stack Overflow", "Discord"],
            "posts": posts,
        })),
        ctx.finding(
            "7",
            Category::Web,
            "Leaked data",
            Source::Fixed("Breach Database Monitor"),
            91,
            36 * HOUR,
        )
        .described("Information found in compromised databases")
        .with_attributes(json!({
            "search_term": q,
            "breaches": ["Collection #1", "LinkedIn 2021"],
            "data_types": ["Email", "Username", "Password Hash"],
        })),
    ]
}

fn facebook<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let profile_id: String = (0..9)
        .map(|_| ALPHABET[ctx.rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    let verified = ctx.chance(0.3);
    let bio_topic = if ctx.chance(0.5) { "technology" } else { "travel" };
    let relationship = if ctx.chance(0.5) { "In a relationship" } else { "Single" };
    let total_posts = ctx.count(50, 200);
    let avg_likes = ctx.count(10, 50);
    let check_ins = ctx.count(10, 50);
    let photos = ctx.count(100, 300);
    let videos = ctx.count(5, 20);
    let reels = ctx.count(3, 15);
    let friends = ctx.count(200, 800);
    let mutual_friends = ctx.count(10, 50);
    let liked_pages = ctx.count(50, 100);
    let past_events = ctx.count(10, 30);
    let reviews_written = ctx.count(3, 15);
    let reviews_received = ctx.count(1, 10);
    let notes = ctx.count(1, 5);
    let email = if ctx.chance(0.5) {
        format!("{}@email.com", ctx.slug("."))
    } else {
        "Not public".to_string()
    };
    let phone = if ctx.chance(0.3) { "+33 6 XX XX XX XX" } else { "Not public" };
    let website = if ctx.chance(0.2) {
        format!("www.{}.com", ctx.slug(""))
    } else {
        "None".to_string()
    };

    vec![
        ctx.extra("fb_profile", Category::Social, "Facebook profile", "Facebook Profile Scanner", 94, HOUR)
            .described("Main profile with basic information and full introduction")
            .with_attributes(json!({
                "section": "Profile",
                "profile_id": format!("fb_{profile_id}"),
                "verified": verified,
                "public_profile": true,
                "last_active": "2024-01-20",
            })),
        ctx.extra("fb_about", Category::Social, "About", "Facebook About Section", 89, 2 * HOUR)
            .described("Full introduction, interests, languages and personal description")
            .with_attributes(json!({
                "section": "About",
                "languages": ["French", "English"],
                "interests": ["Technology", "Travel", "Photography"],
                "bio": format!("Passionate about {bio_topic}..."),
                "relationship": relationship,
            })),
        ctx.extra("fb_posts", Category::Social, "Timeline", "Facebook Timeline Analyzer", 91, 30 * MINUTE)
            .described(format!(
                "History of visible posts, activity and interactions ({total_posts} posts)"
            ))
            .with_attributes(json!({
                "section": "Posts",
                "total_posts": total_posts,
                "last_post": "2024-01-19",
                "avg_likes": avg_likes,
                "most_active_hour": "20:00-22:00",
            })),
        ctx.extra(
            "fb_work_education",
            Category::Social,
            "Work and education",
            "Facebook Work & Education Parser",
            86,
            3 * HOUR,
        )
        .described("Employment history, training and full educational background")
        .with_attributes(json!({
            "section": "Work & Education",
            "current_job": "Software Engineer at TechCorp",
            "education": "MSc Computer Science - Université Paris",
            "work_history": ["TechCorp (2022-present)", "StartupXYZ (2020-2022)"],
            "skills": ["JavaScript", "Python", "React"],
        })),
        ctx.extra("fb_places", Category::Social, "Places", "Facebook Places & Check-ins", 83, 4 * HOUR)
            .described(format!(
                "Home towns, check-ins and visited locations ({check_ins} places)"
            ))
            .with_attributes(json!({
                "section": "Places",
                "current_city": "Paris, France",
                "hometown": "Lyon, France",
                "recent_checkins": ["Café Central", "Musée du Louvre", "Parc des Buttes-Chaumont"],
                "total_checkins": check_ins,
            })),
        ctx.extra("fb_media", Category::Social, "Photos and media", "Facebook Media Analyzer", 88, 5 * HOUR)
            .described(format!(
                "Photo albums, videos, reels and visual content ({photos} items)"
            ))
            .with_attributes(json!({
                "section": "Media",
                "total_photos": photos,
                "albums": ["Holidays 2023", "Family", "Work", "Friends"],
                "videos": videos,
                "reels": reels,
            })),
        ctx.extra("fb_friends", Category::Social, "Friends", "Facebook Social Network Mapper", 79, 6 * HOUR)
            .described(format!(
                "Friends list, family and social connections ({friends} friends)"
            ))
            .with_attributes(json!({
                "section": "Friends & Family",
                "total_friends": friends,
                "mutual_friends": mutual_friends,
                "family_members": ["Marie Dupont (Sister)", "Jean Dupont (Father)"],
                "top_friends": ["Alice Martin", "Bob Durand", "Claire Moreau"],
            })),
        ctx.extra("fb_interests", Category::Social, "Interests", "Facebook Interests Profiler", 85, 7 * HOUR)
            .described("Liked pages, sports, music, films, books and other interests")
            .with_attributes(json!({
                "section": "Interests",
                "liked_pages": liked_pages,
                "sports": ["Football", "Tennis"],
                "music": ["Rock", "Jazz", "Electronic"],
                "movies": ["Science fiction", "Thriller"],
                "books": ["Novels", "Biographies"],
                "games": ["Chess.com", "Candy Crush"],
            })),
        ctx.extra(
            "fb_activities",
            Category::Social,
            "Activities and events",
            "Facebook Activity Tracker",
            82,
            8 * HOUR,
        )
        .described("Events, reviews, notes and recent activity on the platform")
        .with_attributes(json!({
            "section": "Activities",
            "upcoming_events": ["Tech Conference 2024", "Jazz Club Concert"],
            "past_events": past_events,
            "reviews_written": reviews_written,
            "reviews_received": reviews_received,
            "notes": notes,
        })),
        ctx.extra(
            "fb_contact",
            Category::Social,
            "Contact information",
            "Facebook Contact Extractor",
            77,
            9 * HOUR,
        )
        .described("Email, phone, social links and other available contact details")
        .with_attributes(json!({
            "section": "Contact",
            "email": email,
            "phone": phone,
            "website": website,
            "social_links": ["Instagram", "LinkedIn"],
        })),
    ]
}

fn twitter<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let followers = ctx.count(100, 5000);
    let tweets = ctx.count(50, 2000);

    vec![ctx
        .extra(
            "tw1",
            Category::Social,
            "X (Twitter) account",
            "X (Twitter) API",
            92,
            2 * HOUR,
        )
        .described(format!("Active Twitter profile for {}", ctx.query))
        .with_attributes(json!({
            "platform": "Twitter",
            "handle": format!("@{}", ctx.slug("_")),
            "followers": followers,
            "tweets": tweets,
        }))]
}

fn instagram<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let followers = ctx.count(200, 3000);
    let posts = ctx.count(20, 800);

    vec![ctx
        .extra(
            "ig1",
            Category::Social,
            "Instagram profile",
            "Instagram Basic Display API",
            84,
            6 * HOUR,
        )
        .described("Instagram account with public content")
        .with_attributes(json!({
            "platform": "Instagram",
            "username": ctx.slug("."),
            "followers": followers,
            "posts": posts,
        }))]
}

fn linkedin<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let connections = ctx.count(100, 500);

    vec![ctx
        .extra(
            "li1",
            Category::Social,
            "LinkedIn profile",
            "LinkedIn API",
            95,
            HOUR,
        )
        .described("Professional LinkedIn profile")
        .with_attributes(json!({
            "platform": "LinkedIn",
            "position": "Software Engineer",
            "company": "Tech Corp",
            "connections": connections,
        }))]
}

fn breaches<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    vec![ctx
        .extra(
            "breach1",
            Category::Web,
            "Compromised data",
            "Breach Database Monitor",
            96,
            12 * HOUR,
        )
        .described("Information found in data leaks")
        .with_attributes(json!({
            "breaches": ["Collection #1", "LinkedIn 2021", "Adobe 2019"],
            "data_types": ["Email", "Password Hash", "Username"],
            "risk_level": "High",
        }))]
}

fn crypto<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let transactions = ctx.count(5, 50);
    let total_value = ctx.count(100, 10_000);

    vec![ctx
        .extra(
            "crypto1",
            Category::Web,
            "Crypto addresses",
            "Blockchain Explorer",
            89,
            8 * HOUR,
        )
        .described("Blockchain wallets and transactions")
        .with_attributes(json!({
            "wallets": ["Bitcoin", "Ethereum"],
            "transactions": transactions,
            "total_value": format!("{total_value} USD"),
        }))]
}

fn vehicles<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    vec![ctx
        .extra(
            "vehicle1",
            Category::Web,
            "Registered vehicles",
            "Vehicle Registration DB",
            78,
            16 * HOUR,
        )
        .described("Information on associated vehicles")
        .with_attributes(json!({
            "vehicles": ["Renault Clio 2019", "BMW X3 2021"],
            "registrations": 2,
            "status": "Active",
        }))]
}

fn business<R: Rng + ?Sized>(ctx: &mut TemplateContext<'_, R>) -> Vec<Finding> {
    let q = ctx.query;
    let siren = ctx.count(100_000_000, 900_000_000);

    vec![ctx
        .extra(
            "biz1",
            Category::Document,
            "Company registrations",
            "Business Registry Database",
            93,
            24 * HOUR,
        )
        .described("Commercial and government records")
        .with_attributes(json!({
            "companies": [format!("{q} SARL"), format!("{q} SAS")],
            "siret": siren.to_string(),
            "status": "Active",
        }))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx<'a>(query: &'a str, filter: SourceFilter, rng: &'a mut StdRng) -> TemplateContext<'a, StdRng> {
        TemplateContext::new(query, filter, rng, Utc::now())
    }

    #[test]
    fn test_slug_keeps_edge_whitespace_as_separator() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ctx(" Jean  Dupont", SourceFilter::All, &mut rng).slug("_"), "_jean_dupont");
        assert_eq!(ctx("Jean\u{a0}Dupont ", SourceFilter::All, &mut rng).slug("."), "jean.dupont.");
        assert_eq!(ctx("Jean Dupont", SourceFilter::All, &mut rng).slug(""), "jeandupont");
    }

    #[test]
    fn test_base_set_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        let cases = [
            ("a@b.c", QueryKind::Email, 5),
            ("0102", QueryKind::Phone, 4),
            ("1.1.1.1", QueryKind::IpAddress, 3),
            ("example.com", QueryKind::Domain, 3),
            ("anything", QueryKind::GenericTerm, 7),
        ];

        for (query, kind, expected) in cases {
            let mut c = ctx(query, SourceFilter::All, &mut rng);
            assert_eq!(base_templates(&mut c, kind).len(), expected, "{kind}");
        }
    }

    #[test]
    fn test_filter_set_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        let cases = [
            (SourceFilter::Facebook, 10),
            (SourceFilter::Twitter, 1),
            (SourceFilter::Instagram, 1),
            (SourceFilter::Linkedin, 1),
            (SourceFilter::Breaches, 1),
            (SourceFilter::Crypto, 1),
            (SourceFilter::Vehicles, 1),
            (SourceFilter::Business, 1),
            (SourceFilter::Maps, 0),
            (SourceFilter::Email, 0),
            (SourceFilter::All, 0),
        ];

        for (filter, expected) in cases {
            let mut c = ctx("Jean Dupont", filter, &mut rng);
            assert_eq!(filter_templates(&mut c).len(), expected, "{filter}");
        }
    }

    #[test]
    fn test_handles_are_derived_from_the_query() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut c = ctx("Jean  Dupont", SourceFilter::Twitter, &mut rng);
        let tweet = &filter_templates(&mut c)[0];
        assert_eq!(tweet.attributes["handle"], "@jean_dupont");

        let mut c = ctx("Jean Dupont", SourceFilter::Instagram, &mut rng);
        let insta = &filter_templates(&mut c)[0];
        assert_eq!(insta.attributes["username"], "jean.dupont");
    }

    #[test]
    fn test_random_counts_stay_in_range() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut c = ctx("Jean Dupont", SourceFilter::Facebook, &mut rng);
            let findings = filter_templates(&mut c);

            let friends = findings[6].attributes["total_friends"].as_u64().unwrap();
            assert!((200..1000).contains(&friends));

            let profile_id = findings[0].attributes["profile_id"].as_str().unwrap();
            assert_eq!(profile_id.len(), 12);
            assert!(profile_id.starts_with("fb_"));
        }
    }

    #[test]
    fn test_source_follows_filter_only_where_templated() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut c = ctx("+33 1 23 45 67 89", SourceFilter::Phone, &mut rng);
        let findings = base_templates(&mut c, QueryKind::Phone);

        assert_eq!(findings[0].source_label, "Telecom Database");
        assert_eq!(findings[2].source_label, "Social Phone Lookup");
    }
}
