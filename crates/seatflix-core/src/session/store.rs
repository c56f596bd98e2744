//! Session store: the single source of truth for authentication state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

use super::model::{Identity, Session, SessionSnapshot};
use crate::error::{Result, SeatflixError};
use crate::storage::{AUTH_TOKEN_KEY, DurableStorage, StorageWrite, USER_ID_KEY, USER_KEY};

/// What durable storage holds at restore time.
enum Persisted {
    Absent,
    Valid { token: String, identity: Identity },
    Corrupt(SeatflixError),
}

/// Owns the `Session` and writes every mutation through to durable storage.
///
/// Built once by the composition root and shared as `Arc<SessionStore>`.
/// Every mutating operation commits to storage first, then updates memory,
/// then publishes a fresh snapshot to subscribers.
pub struct SessionStore {
    storage: Arc<dyn DurableStorage>,
    session: RwLock<Session>,
    publisher: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Creates an empty, loading session over the given storage.
    ///
    /// Nothing is read until [`restore`](Self::restore) runs.
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let session = Session::new();
        let (publisher, _) = watch::channel(session.snapshot());
        Self {
            storage,
            session: RwLock::new(session),
            publisher,
        }
    }

    /// Loads the persisted session. Runs once at process start.
    ///
    /// Never fails: unreadable storage counts as "absent" and a corrupt
    /// identity purges the persisted session keys. `loading` is false on return.
    pub fn restore(&self) -> SessionSnapshot {
        let mut session = self.write();
        if !session.is_loading() {
            tracing::warn!("[Session] restore called after the session was already settled");
            return session.snapshot();
        }

        match self.read_persisted() {
            Persisted::Valid { token, identity } => {
                tracing::info!(user_id = %identity.user_id, "[Session] restored persisted session");
                session.authenticate(token, identity);
            }
            Persisted::Absent => {
                tracing::debug!("[Session] no persisted session");
            }
            Persisted::Corrupt(err) => {
                tracing::warn!(error = %err, "[Session] discarding corrupt persisted session");
                if let Err(purge_err) = self.storage.apply(&StorageWrite::clear_session()) {
                    tracing::warn!(error = %purge_err, "[Session] failed to purge persisted session");
                }
            }
        }

        session.finish_loading();
        let snapshot = session.snapshot();
        drop(session);

        self.publish(snapshot.clone());
        snapshot
    }

    /// Records a successful authentication.
    ///
    /// Writes `authToken`, `user` and `userId` in one batch before touching
    /// memory; on a storage failure the in-memory session is left unchanged.
    pub fn login(&self, token: impl Into<String>, identity: Identity) -> Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SeatflixError::validation("login requires a non-empty token"));
        }
        identity.validate()?;

        let user_json = identity.to_json()?;
        self.storage.apply(&[
            StorageWrite::set(AUTH_TOKEN_KEY, token.as_str()),
            StorageWrite::set(USER_KEY, user_json),
            StorageWrite::set(USER_ID_KEY, identity.user_id.as_str()),
        ])?;

        tracing::info!(user_id = %identity.user_id, username = %identity.username, "[Session] signed in");

        let snapshot = {
            let mut session = self.write();
            session.authenticate(token, identity);
            session.snapshot()
        };
        self.publish(snapshot);
        Ok(())
    }

    /// Signs out. Idempotent.
    ///
    /// Memory is reset even when storage refuses the removal, so the process
    /// never keeps acting as signed in; the storage error is still returned.
    pub fn logout(&self) -> Result<()> {
        let persisted = self.storage.apply(&StorageWrite::clear_session());
        if let Err(ref err) = persisted {
            tracing::error!(error = %err, "[Session] failed to erase persisted session");
        }

        let snapshot = {
            let mut session = self.write();
            session.clear();
            session.snapshot()
        };
        tracing::info!("[Session] signed out");
        self.publish(snapshot);

        persisted
    }

    /// Replaces the identity snapshot without touching the token.
    pub fn update_identity(&self, identity: Identity) -> Result<()> {
        identity.validate()?;
        self.storage.set_item(USER_KEY, &identity.to_json()?)?;

        let snapshot = {
            let mut session = self.write();
            session.replace_identity(identity);
            session.snapshot()
        };
        tracing::debug!("[Session] identity updated");
        self.publish(snapshot);
        Ok(())
    }

    /// Current read-only view.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().snapshot()
    }

    /// Receives a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.publisher.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read().identity().cloned()
    }

    /// The in-memory token. Outbound requests read storage instead.
    pub fn token(&self) -> Option<String> {
        self.read().token().map(str::to_string)
    }

    fn read_persisted(&self) -> Persisted {
        let token = match self.storage.get_item(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "[Session] could not read persisted token");
                return Persisted::Absent;
            }
        };
        let user = match self.storage.get_item(USER_KEY) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "[Session] could not read persisted identity");
                return Persisted::Absent;
            }
        };

        let (Some(token), Some(user)) = (token, user) else {
            return Persisted::Absent;
        };

        if token.trim().is_empty() {
            return Persisted::Corrupt(SeatflixError::validation("persisted token is empty"));
        }

        match Identity::from_json(&user) {
            Ok(identity) => Persisted::Valid { token, identity },
            Err(err) => Persisted::Corrupt(err),
        }
    }

    fn publish(&self, snapshot: SessionSnapshot) {
        self.publisher.send_replace(snapshot);
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
