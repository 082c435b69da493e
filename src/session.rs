use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::SnakeError;
use crate::game::SnakeEngine;

pub type SessionId = String;

/// One remote game: an engine plus the socket-attachment flag.
#[derive(Debug)]
pub struct Session {
    engine: Mutex<SnakeEngine>,
    attached: AtomicBool,
}

impl Session {
    #[must_use]
    pub fn new(engine: SnakeEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
            attached: AtomicBool::new(false),
        }
    }

    /// Engine access; hold the guard for exactly one engine call.
    pub fn engine(&self) -> &Mutex<SnakeEngine> {
        &self.engine
    }

    /// Claims the session for one socket. Returns false when another socket
    /// already drives it.
    pub fn try_attach(&self) -> bool {
        self.attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

/// In-memory map of live sessions. Cloning shares the same map.
///
/// The map lock is held only while touching the map, never across an
/// engine call.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Session>>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `engine` under a fresh random id.
    pub async fn create(&self, engine: SnakeEngine) -> SessionId {
        let session_id = Uuid::new_v4().to_string();
        self.insert(session_id.clone(), engine).await;
        tracing::info!(%session_id, "session created");
        session_id
    }

    /// Registers `engine` under `session_id`, replacing any previous entry.
    pub async fn insert(&self, session_id: SessionId, engine: SnakeEngine) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, Arc::new(Session::new(engine)));
    }

    pub async fn get(&self, session_id: &str) -> Result<Arc<Session>, SnakeError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SnakeError::NotInitialized(session_id.to_owned()))
    }

    /// Drops the registry's handle on the session.
    pub async fn remove(&self, session_id: &str) -> Result<Arc<Session>, SnakeError> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions
            .remove(session_id)
            .ok_or_else(|| SnakeError::NotInitialized(session_id.to_owned()))?;
        drop(sessions);

        tracing::info!(%session_id, "session removed");
        Ok(removed)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::error::SnakeError;
    use crate::game::SnakeEngine;

    use super::SessionRegistry;

    fn engine() -> SnakeEngine {
        SnakeEngine::new_with_seed(EngineConfig::default(), 1).expect("default config is valid")
    }

    #[tokio::test]
    async fn create_get_remove() {
        let registry = SessionRegistry::new();
        let session_id = registry.create(engine()).await;

        assert_eq!(registry.len().await, 1);

        let session = registry.get(&session_id).await.expect("session exists");
        assert_eq!(session.engine().lock().await.score(), 0);

        registry.remove(&session_id).await.expect("session exists");
        assert_eq!(registry.len().await, 0);
        assert_eq!(
            registry.get(&session_id).await.map(|_| ()),
            Err(SnakeError::NotInitialized(session_id.clone()))
        );
        assert!(registry.remove(&session_id).await.is_err());
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let registry = SessionRegistry::new();
        let first = registry.create(engine()).await;
        let second = registry.create(engine()).await;
        assert_ne!(first, second);

        let session = registry.get(&first).await.expect("first exists");
        session.engine().lock().await.step();

        let other = registry.get(&second).await.expect("second exists");
        assert_eq!(other.engine().lock().await.snapshot().steps, 0);
    }

    #[tokio::test]
    async fn only_one_socket_attaches() {
        let registry = SessionRegistry::new();
        registry.insert("fixed".to_owned(), engine()).await;
        let session = registry.get("fixed").await.expect("inserted");

        assert!(session.try_attach());
        assert!(!session.try_attach());
        session.detach();
        assert!(!session.is_attached());
        assert!(session.try_attach());
    }
}
