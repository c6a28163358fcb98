//! Dashboard transitions
//!
//! [`reduce`] is the only way state changes: it takes the current state and
//! an action and returns the next state, without side effects.

use super::modules::ModuleKind;
use super::state::{DashboardState, Screen, SearchPanel};
use crate::search::{Finding, ProfileImage, SourceFilter};
use crate::watchlist::WatchlistAction;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BootCompleted,
    LoginStarted,
    LoginSucceeded,
    LoginFailed { reason: String },
    OpenModule(ModuleKind),
    CloseModule,
    RequestLogout,
    CancelLogout,
    ConfirmLogout,
    SearchEdited { query: String, source: SourceFilter },
    SearchStarted { search_id: Uuid },
    SearchCompleted { search_id: Uuid, findings: Vec<Finding> },
    PreviewImage(Option<ProfileImage>),
    Watchlist(WatchlistAction),
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::BootCompleted => "boot_completed",
            Action::LoginStarted => "login_started",
            Action::LoginSucceeded => "login_succeeded",
            Action::LoginFailed { .. } => "login_failed",
            Action::OpenModule(_) => "open_module",
            Action::CloseModule => "close_module",
            Action::RequestLogout => "request_logout",
            Action::CancelLogout => "cancel_logout",
            Action::ConfirmLogout => "confirm_logout",
            Action::SearchEdited { .. } => "search_edited",
            Action::SearchStarted { .. } => "search_started",
            Action::SearchCompleted { .. } => "search_completed",
            Action::PreviewImage(_) => "preview_image",
            Action::Watchlist(_) => "watchlist",
        }
    }

    fn needs_session(&self) -> bool {
        matches!(
            self,
            Action::OpenModule(_)
                | Action::CloseModule
                | Action::RequestLogout
                | Action::ConfirmLogout
                | Action::SearchEdited { .. }
                | Action::SearchStarted { .. }
                | Action::SearchCompleted { .. }
                | Action::PreviewImage(_)
                | Action::Watchlist(_)
        )
    }
}

pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    if action.needs_session() && !state.authenticated {
        return state;
    }

    match action {
        Action::BootCompleted => {
            if state.screen == Screen::Boot {
                state.screen = if state.authenticated {
                    Screen::Home
                } else {
                    Screen::Login
                };
            }
        }
        Action::LoginStarted => {
            if !state.authenticated {
                state.login_pending = true;
                state.login_error = None;
            }
        }
        Action::LoginSucceeded => {
            state.authenticated = true;
            state.login_pending = false;
            state.login_error = None;
            state.screen = Screen::Home;
        }
        Action::LoginFailed { reason } => {
            if !state.authenticated {
                state.login_pending = false;
                state.login_error = Some(reason);
            }
        }
        Action::OpenModule(kind) => {
            state.screen = Screen::Module(kind);
            state.logout_prompt = false;
        }
        Action::CloseModule => {
            if let Screen::Module(_) = state.screen {
                state.screen = Screen::Home;
            }
        }
        Action::RequestLogout => state.logout_prompt = true,
        Action::CancelLogout => state.logout_prompt = false,
        Action::ConfirmLogout => {
            return DashboardState {
                screen: Screen::Login,
                search: SearchPanel::default(),
                ..DashboardState::with_watchlist(state.watchlist)
            };
        }
        Action::SearchEdited { query, source } => {
            state.search.query = query;
            state.search.source = source;
        }
        Action::SearchStarted { search_id } => {
            state.search.in_flight = Some(search_id);
            state.search.results.clear();
            state.search.preview = None;
        }
        Action::SearchCompleted {
            search_id,
            findings,
        } => {
            if state.search.in_flight == Some(search_id) {
                state.search.in_flight = None;
                state.search.results = findings;
                state.search.last_completed = Some(search_id);
            }
        }
        Action::PreviewImage(image) => state.search.preview = image,
        Action::Watchlist(edit) => {
            state.watchlist = std::mem::take(&mut state.watchlist).apply(edit);
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Category;
    use chrono::Utc;

    fn run(actions: impl IntoIterator<Item = Action>) -> DashboardState {
        actions
            .into_iter()
            .fold(DashboardState::default(), reduce)
    }

    fn logged_in() -> DashboardState {
        run([Action::BootCompleted, Action::LoginStarted, Action::LoginSucceeded])
    }

    fn finding(id: &str) -> Finding {
        Finding::blank(id, Category::Social, Utc::now())
    }

    #[test]
    fn test_boot_then_login() {
        let state = run([Action::BootCompleted]);
        assert_eq!(state.screen, Screen::Login);

        let state = reduce(state, Action::LoginStarted);
        assert!(state.login_pending);

        let state = reduce(state, Action::LoginSucceeded);
        assert!(state.authenticated);
        assert!(!state.login_pending);
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_failed_login_keeps_gate_closed() {
        let state = run([
            Action::BootCompleted,
            Action::LoginStarted,
            Action::LoginFailed {
                reason: "Incorrect access code. Access denied.".to_string(),
            },
        ]);

        assert!(!state.authenticated);
        assert!(!state.login_pending);
        assert_eq!(state.screen, Screen::Login);
        assert!(state.login_error.is_some());

        let state = reduce(state, Action::LoginStarted);
        assert!(state.login_error.is_none());
    }

    #[test]
    fn test_modules_need_a_session() {
        let state = run([Action::BootCompleted, Action::OpenModule(ModuleKind::Search)]);
        assert_eq!(state.screen, Screen::Login);

        let state = reduce(logged_in(), Action::OpenModule(ModuleKind::Search));
        assert_eq!(state.screen, Screen::Module(ModuleKind::Search));
        assert_eq!(state.active_module(), Some(ModuleKind::Search));

        let state = reduce(state, Action::CloseModule);
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_logout_can_be_cancelled() {
        let state = reduce(logged_in(), Action::RequestLogout);
        assert!(state.logout_prompt);

        let state = reduce(state, Action::CancelLogout);
        assert!(!state.logout_prompt);
        assert!(state.authenticated);
    }

    #[test]
    fn test_confirm_logout_resets_search_and_keeps_watchlist() {
        let id = Uuid::new_v4();
        let state = [
            Action::OpenModule(ModuleKind::Search),
            Action::SearchEdited {
                query: "Jean Dupont".to_string(),
                source: SourceFilter::Facebook,
            },
            Action::SearchStarted { search_id: id },
            Action::SearchCompleted {
                search_id: id,
                findings: vec![finding("1")],
            },
            Action::Watchlist(WatchlistAction::Add {
                id: "w1".to_string(),
                keyword: "ransomware".to_string(),
                sources: vec!["web".to_string()],
                frequency: Default::default(),
                sensitivity: Default::default(),
                at: Utc::now(),
            }),
            Action::RequestLogout,
            Action::ConfirmLogout,
        ]
        .into_iter()
        .fold(logged_in(), reduce);

        assert!(!state.authenticated);
        assert!(!state.logout_prompt);
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.search, SearchPanel::default());
        assert!(state.watchlist.alert("w1").is_some());
    }

    #[test]
    fn test_search_lifecycle() {
        let id = Uuid::new_v4();
        let state = reduce(logged_in(), Action::SearchStarted { search_id: id });
        assert_eq!(state.search.in_flight, Some(id));
        assert!(!state.search.can_submit());

        let state = reduce(
            state,
            Action::SearchCompleted {
                search_id: id,
                findings: vec![finding("1"), finding("2")],
            },
        );
        assert!(state.search.in_flight.is_none());
        assert_eq!(state.search.results.len(), 2);
        assert_eq!(state.search.last_completed, Some(id));
        assert!(!state.search.shows_empty_notice());
    }

    #[test]
    fn test_latest_search_wins() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let state = [
            Action::SearchStarted { search_id: first },
            Action::SearchStarted { search_id: second },
            Action::SearchCompleted {
                search_id: first,
                findings: vec![finding("stale")],
            },
        ]
        .into_iter()
        .fold(logged_in(), reduce);

        assert_eq!(state.search.in_flight, Some(second));
        assert!(state.search.results.is_empty());

        let state = reduce(
            state,
            Action::SearchCompleted {
                search_id: second,
                findings: vec![finding("fresh")],
            },
        );
        assert_eq!(state.search.results[0].id, "fresh");
    }

    #[test]
    fn test_empty_search_shows_notice() {
        let id = Uuid::new_v4();
        let state = [
            Action::SearchStarted { search_id: id },
            Action::SearchCompleted {
                search_id: id,
                findings: Vec::new(),
            },
        ]
        .into_iter()
        .fold(logged_in(), reduce);

        assert!(state.search.shows_empty_notice());
    }

    #[test]
    fn test_new_search_clears_previous_results_and_preview() {
        let first = Uuid::new_v4();
        let image = ProfileImage {
            url: "https://images.unsplash.com/photo-1500000094".to_string(),
            source: "Facebook".to_string(),
            verified: true,
            last_updated: Utc::now(),
        };
        let state = [
            Action::SearchStarted { search_id: first },
            Action::SearchCompleted {
                search_id: first,
                findings: vec![finding("1")],
            },
            Action::PreviewImage(Some(image)),
        ]
        .into_iter()
        .fold(logged_in(), reduce);
        assert!(state.search.preview.is_some());

        let state = reduce(
            state,
            Action::SearchStarted {
                search_id: Uuid::new_v4(),
            },
        );
        assert!(state.search.results.is_empty());
        assert!(state.search.preview.is_none());
    }

    #[test]
    fn test_watchlist_edits_need_a_session() {
        let state = run([Action::Watchlist(WatchlistAction::Remove("1".to_string()))]);
        assert_eq!(state, DashboardState::default());
    }
}
