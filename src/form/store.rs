use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use uuid::Uuid;

use super::FormSession;
use crate::error::{AppError, AppResult};

struct Entry {
    session: FormSession,
    touched: Instant,
}

impl Entry {
    fn new(session: FormSession) -> Self {
        Self {
            session,
            touched: Instant::now(),
        }
    }
}

/// In-memory form sessions, one per client.
///
/// Every `get` or `update` refreshes a session's last-touched time; sessions
/// idle for longer than the TTL are dropped by [`SessionStore::evict_idle`].
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, FormSession) {
        let id = Uuid::new_v4();
        let session = FormSession::new();
        self.sessions
            .write()
            .await
            .insert(id, Entry::new(session.clone()));
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<FormSession> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.touched = Instant::now();
        Ok(entry.session.clone())
    }

    /// Run `f` against the session under the write lock and return its result
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut FormSession) -> T) -> AppResult<T> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.touched = Instant::now();
        Ok(f(&mut entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions not touched within `ttl`, returning how many were dropped
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.touched) < ttl);
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle form sessions");
        }
        evicted
    }

    /// Sweep idle sessions every half TTL (at least once a second) until aborted
    pub fn spawn_eviction(&self, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let period = (ttl / 2).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                store.evict_idle(ttl).await;
            }
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Form session {} not found", id))
}
