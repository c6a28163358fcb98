//! Dashboard application state

use super::modules::ModuleKind;
use crate::search::{Finding, ProfileImage, SourceFilter};
use crate::watchlist::Watchlist;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Screen currently displayed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "name", content = "module", rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Boot,
    Login,
    Home,
    Module(ModuleKind),
}

/// State of the search module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPanel {
    pub query: String,
    pub source: SourceFilter,
    /// Search currently waiting for results
    pub in_flight: Option<Uuid>,
    pub results: Vec<Finding>,
    /// Most recent search whose results were applied
    pub last_completed: Option<Uuid>,
    /// Profile image opened for a closer look
    pub preview: Option<ProfileImage>,
}

impl SearchPanel {
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && !self.query.trim().is_empty()
    }

    /// A finished search came back empty
    pub fn shows_empty_notice(&self) -> bool {
        self.in_flight.is_none() && self.last_completed.is_some() && self.results.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardState {
    pub screen: Screen,
    pub authenticated: bool,
    pub login_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_error: Option<String>,
    pub logout_prompt: bool,
    pub search: SearchPanel,
    pub watchlist: Watchlist,
}

impl DashboardState {
    pub fn with_watchlist(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }

    pub fn active_module(&self) -> Option<ModuleKind> {
        match self.screen {
            Screen::Module(kind) => Some(kind),
            _ => None,
        }
    }
}
