//! Module catalogue shown on the home screen

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard module
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Search,
    Surveillance,
    Database,
    Network,
    Documents,
    Geolocation,
}

impl ModuleKind {
    /// Home screen order
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Search,
        ModuleKind::Surveillance,
        ModuleKind::Database,
        ModuleKind::Network,
        ModuleKind::Documents,
        ModuleKind::Geolocation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ModuleKind::Search => "search",
            ModuleKind::Surveillance => "surveillance",
            ModuleKind::Database => "database",
            ModuleKind::Network => "network",
            ModuleKind::Documents => "documents",
            ModuleKind::Geolocation => "geolocation",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModuleKind::Search => "Advanced Search",
            ModuleKind::Surveillance => "Web Surveillance",
            ModuleKind::Database => "Database Access",
            ModuleKind::Network => "Network Analysis",
            ModuleKind::Documents => "Document Analysis",
            ModuleKind::Geolocation => "Geolocation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModuleKind::Search => "Multi-source analysis and data correlation",
            ModuleKind::Surveillance => "Real-time monitoring of social platforms",
            ModuleKind::Database => "Access to public archives and databases",
            ModuleKind::Network => "Mapping of connections and infrastructure",
            ModuleKind::Documents => "Metadata extraction and analysis",
            ModuleKind::Geolocation => "Geospatial analysis and location tracking",
        }
    }

    /// Call to action on the module tile
    pub fn action_label(&self) -> &'static str {
        match self {
            ModuleKind::Search => "Start a search",
            ModuleKind::Surveillance => "Configure surveillance",
            ModuleKind::Database => "Open databases",
            ModuleKind::Network => "Analyse the network",
            ModuleKind::Documents => "Analyse documents",
            ModuleKind::Geolocation => "Locate and track",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Home screen tile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleTile {
    pub id: ModuleKind,
    pub title: String,
    pub description: String,
    pub action_label: String,
    pub status: String,
}

pub fn catalog() -> Vec<ModuleTile> {
    ModuleKind::ALL
        .into_iter()
        .map(|kind| ModuleTile {
            id: kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            action_label: kind.action_label().to_string(),
            status: "ACTIVE".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips() {
        for kind in ModuleKind::ALL {
            assert_eq!(ModuleKind::parse(kind.id()), Some(kind));
        }
        assert_eq!(ModuleKind::parse("radar"), None);
    }

    #[test]
    fn test_catalog_lists_every_module_as_active() {
        let tiles = catalog();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0].id, ModuleKind::Search);
        assert!(tiles.iter().all(|tile| tile.status == "ACTIVE"));
    }
}
