//! Per-user cache of the rendered dashboard.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use checkup_structs::{AuthSession, CheckUpHistory, CheckUpRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HistoryError;
use crate::store::CheckUpStore;
use crate::workflow::CheckUpService;

/// Receives the signal that a user's dashboard no longer reflects storage.
pub trait ViewInvalidator: Send + Sync {
    fn invalidate_dashboard(&self, user_id: &str);
}

/// Dashboard document served to a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub name: String,
    pub email: String,
    pub count: i64,
    pub check_ups: Vec<CheckUpRecord>,
    pub rendered_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn render(session: &AuthSession, history: CheckUpHistory) -> Self {
        Self {
            name: session.user.name.clone(),
            email: session.user.email.clone(),
            count: history.count,
            check_ups: history.check_ups,
            rendered_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct Entries {
    views: HashMap<String, DashboardView>,
    // Bumped on every invalidation so a render started earlier is discarded.
    generations: HashMap<String, u64>,
}

#[derive(Default)]
pub struct DashboardCache {
    entries: RwLock<Entries>,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<DashboardView> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.views.get(user_id).cloned()
    }

    /// Current generation for `user_id`, to be passed to [`Self::insert_if_current`].
    pub fn generation(&self, user_id: &str) -> u64 {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.generations.get(user_id).copied().unwrap_or_default()
    }

    /// Stores `view` unless the user was invalidated after `generation` was read.
    pub fn insert_if_current(&self, user_id: &str, generation: u64, view: DashboardView) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let current = entries.generations.get(user_id).copied().unwrap_or_default();
        if current != generation {
            debug!(%user_id, "Discarding stale dashboard render");
            return false;
        }
        entries.views.insert(user_id.to_owned(), view);
        true
    }

    /// Returns the cached dashboard, rendering it from history on a miss.
    ///
    /// # Errors
    ///
    /// Returns the history error unchanged. Failed renders are not cached.
    pub async fn load<S: CheckUpStore, P, V>(
        &self,
        service: &CheckUpService<S, P, V>,
        session: &AuthSession,
    ) -> Result<DashboardView, HistoryError> {
        let user_id = session.user.id.as_str();
        if let Some(view) = self.get(user_id) {
            debug!(%user_id, "Dashboard cache hit");
            return Ok(view);
        }

        let generation = self.generation(user_id);
        let history = service
            .check_up_history(Some(user_id), Some(&session.user.email))
            .await?;
        let view = DashboardView::render(session, history);
        self.insert_if_current(user_id, generation, view.clone());
        Ok(view)
    }
}

impl ViewInvalidator for DashboardCache {
    fn invalidate_dashboard(&self, user_id: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.views.remove(user_id);
        *entries.generations.entry(user_id.to_owned()).or_default() += 1;
        debug!(%user_id, "Invalidated dashboard");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use chrono::Duration;
    use checkup_structs::SchemaVariant;

    use super::*;
    use crate::testing::{FakePredictor, MemoryStore, user, workplace_answers};

    fn session() -> AuthSession {
        AuthSession {
            user: user("u1", "ada@example.com", true),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn empty_view() -> DashboardView {
        DashboardView::render(
            &session(),
            CheckUpHistory {
                count: 0,
                check_ups: Vec::new(),
            },
        )
    }

    #[test]
    fn test_stale_insert_is_dropped() {
        let cache = DashboardCache::new();
        let generation = cache.generation("u1");
        cache.invalidate_dashboard("u1");

        assert!(!cache.insert_if_current("u1", generation, empty_view()));
        assert!(cache.get("u1").is_none());

        let generation = cache.generation("u1");
        assert!(cache.insert_if_current("u1", generation, empty_view()));
        assert!(cache.get("u1").is_some());
    }

    #[tokio::test]
    async fn test_successful_check_up_refreshes_dashboard() {
        let store = Arc::new(MemoryStore::with_user("u1", "ada@example.com", true));
        let cache = Arc::new(DashboardCache::new());
        let svc = CheckUpService::new(
            Arc::clone(&store),
            Arc::new(FakePredictor::returning("Yes", "Needed")),
            Arc::clone(&cache),
            SchemaVariant::Workplace,
        );
        let session = session();

        assert_eq!(cache.load(&svc, &session).await.unwrap().count, 0);
        assert_eq!(cache.get("u1").unwrap().count, 0);

        svc.submit_check_up(&workplace_answers(), Some("u1"), None)
            .await
            .unwrap();
        assert!(cache.get("u1").is_none());

        let view = cache.load(&svc, &session).await.unwrap();
        assert_eq!(view.count, 1);
        assert_eq!(view.check_ups[0].condition, "Yes");
    }

    #[tokio::test]
    async fn test_failed_check_up_keeps_dashboard() {
        let store = Arc::new(MemoryStore::with_user("u1", "ada@example.com", true));
        let cache = Arc::new(DashboardCache::new());
        let svc = CheckUpService::new(
            Arc::clone(&store),
            Arc::new(FakePredictor::failing("boom")),
            Arc::clone(&cache),
            SchemaVariant::Workplace,
        );
        cache.load(&svc, &session()).await.unwrap();

        assert!(svc
            .submit_check_up(&workplace_answers(), Some("u1"), None)
            .await
            .is_err());
        assert!(cache.get("u1").is_some());
    }

    #[tokio::test]
    async fn test_failed_render_is_not_cached() {
        let store = Arc::new(MemoryStore::with_user("u1", "ada@example.com", true));
        store.fail_reads(anyhow!("down"));
        let cache = Arc::new(DashboardCache::new());
        let svc = CheckUpService::new(
            store,
            Arc::new(FakePredictor::returning("No", "No")),
            Arc::clone(&cache),
            SchemaVariant::Workplace,
        );

        assert!(cache.load(&svc, &session()).await.is_err());
        assert!(cache.get("u1").is_none());
    }
}
