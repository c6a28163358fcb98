//! Dashboard application state
//!
//! Provides:
//! - Module catalogue for the home screen
//! - Serializable dashboard state
//! - Pure reducer over dashboard actions
//! - Shared store applying actions under a lock

mod modules;
mod reducer;
mod state;

pub use modules::{catalog, ModuleKind, ModuleTile};
pub use reducer::{reduce, Action};
pub use state::{DashboardState, Screen, SearchPanel};

use tokio::sync::RwLock;

/// Shared dashboard state
#[derive(Debug, Default)]
pub struct DashboardStore {
    state: RwLock<DashboardState>,
}

impl DashboardStore {
    pub fn new(initial: DashboardState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Apply an action and return the resulting state
    pub async fn dispatch(&self, action: Action) -> DashboardState {
        let mut guard = self.state.write().await;
        let name = action.name();

        if let Action::SearchCompleted { search_id, .. } = &action {
            if guard.search.in_flight != Some(*search_id) {
                tracing::debug!(search_id = %search_id, "Dropping stale search results");
            }
        }

        let next = reduce(std::mem::take(&mut *guard), action);
        tracing::debug!(action = name, screen = ?next.screen, "Dashboard action applied");

        *guard = next.clone();
        next
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::Watchlist;
    use chrono::Utc;

    #[tokio::test]
    async fn test_dispatch_updates_snapshot() {
        let store = DashboardStore::default();

        let state = store.dispatch(Action::BootCompleted).await;
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(store.snapshot().await, state);
    }

    #[tokio::test]
    async fn test_store_keeps_initial_watchlist() {
        let store = DashboardStore::new(DashboardState::with_watchlist(Watchlist::sample(
            Utc::now(),
        )));

        store.dispatch(Action::BootCompleted).await;
        store.dispatch(Action::LoginSucceeded).await;
        store.dispatch(Action::RequestLogout).await;
        let state = store.dispatch(Action::ConfirmLogout).await;

        assert_eq!(state.watchlist.alerts.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let store = std::sync::Arc::new(DashboardStore::default());
        store.dispatch(Action::LoginSucceeded).await;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let kind = ModuleKind::ALL[i % ModuleKind::ALL.len()];
                    store.dispatch(Action::OpenModule(kind)).await
                })
            })
            .collect();

        for handle in handles {
            let state = handle.await.unwrap();
            assert!(state.active_module().is_some());
        }
    }
}
