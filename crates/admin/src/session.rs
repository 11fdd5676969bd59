//! Admin session store.
//!
//! Holds the one active admin session (or none) and persists it to a JSON
//! file with owner-only permissions so it survives restarts. Tokens are never
//! logged or displayed.
//!
//! # Generations
//!
//! Every change to the stored session advances a generation counter. Requests
//! record the generation they were sent under; when a request is rejected as
//! unauthorized the client asks the store to invalidate *that* generation.
//! Only the first rejection for a generation clears anything, so concurrent
//! 401s collapse into a single logout, and a stale 401 from before a fresh
//! login cannot end the new session.

use std::path::{Path, PathBuf};

use ridextra_core::SubjectId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::AdminError;

/// An authenticated admin identity and its bearer token.
#[derive(Clone)]
pub struct Session {
    /// Backend identifier of the admin.
    pub subject_id: SubjectId,
    /// Email the admin logged in with.
    pub email: String,
    /// Opaque bearer token.
    pub token: SecretString,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("subject_id", &self.subject_id)
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Session {
    /// Create a session.
    #[must_use]
    pub fn new(
        subject_id: impl Into<SubjectId>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            token: SecretString::from(token.into()),
        }
    }
}

/// Whether an admin is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    Anonymous,
    /// A session is held.
    Authenticated,
}

/// On-disk session format.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    subject_id: String,
    email: String,
    token: String,
}

impl StoredSession {
    fn into_session(self) -> Option<Session> {
        if self.subject_id.is_empty() || self.token.is_empty() {
            return None;
        }
        Some(Session::new(self.subject_id, self.email, self.token))
    }
}

/// What a request needs from the store: the token and the generation it
/// belongs to.
#[derive(Clone)]
pub(crate) struct SessionSnapshot {
    pub(crate) generation: u64,
    pub(crate) token: Option<SecretString>,
}

#[derive(Default)]
struct SessionSlot {
    session: Option<Session>,
    generation: u64,
}

/// Single source of truth for the current admin session.
///
/// Share one instance (behind an `Arc`) between the login flow and the
/// authenticated client.
pub struct SessionStore {
    path: Option<PathBuf>,
    slot: RwLock<SessionSlot>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// A store that keeps the session in memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            slot: RwLock::new(SessionSlot::default()),
        }
    }

    /// A store persisted at `path`. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            slot: RwLock::new(SessionSlot::default()),
        }
    }

    /// A store for an optional path, with any persisted session loaded.
    pub async fn open(path: Option<PathBuf>) -> Self {
        let store = match path {
            Some(path) => Self::persistent(path),
            None => Self::in_memory(),
        };
        store.load().await;
        store
    }

    /// The session file, if the store is persistent.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist `session` and make it current, replacing any prior session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the session file cannot be written. The
    /// in-memory session is left unchanged in that case.
    #[instrument(skip(self, session), fields(subject_id = %session.subject_id))]
    pub async fn save(&self, session: Session) -> Result<(), AdminError> {
        let mut slot = self.slot.write().await;

        if let Some(path) = &self.path {
            write_session_file(path, &session).await?;
        }

        slot.session = Some(session);
        slot.generation += 1;
        tracing::debug!("Session saved");
        Ok(())
    }

    /// Reconstruct the session from the session file.
    ///
    /// Returns `None` when there is no file. A malformed file is deleted and
    /// treated as absent. For an in-memory store this returns the current
    /// session.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Option<Session> {
        let Some(path) = &self.path else {
            return self.current().await;
        };

        let mut slot = self.slot.write().await;

        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };

        let session = serde_json::from_slice::<StoredSession>(&contents)
            .ok()
            .and_then(StoredSession::into_session);

        let Some(session) = session else {
            tracing::warn!(path = %path.display(), "Discarding malformed session file");
            remove_session_file(path).await;
            return None;
        };

        slot.session = Some(session.clone());
        slot.generation += 1;
        tracing::debug!(subject_id = %session.subject_id, "Session restored");
        Some(session)
    }

    /// Remove the session from memory and from the session file.
    ///
    /// Safe to call when no session exists.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        Self::clear_slot(&mut slot, self.path.as_deref()).await;
    }

    /// The current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.slot.read().await.session.clone()
    }

    /// The current bearer token, if any.
    pub async fn token(&self) -> Option<SecretString> {
        self.slot
            .read()
            .await
            .session
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// Whether an admin is logged in.
    pub async fn state(&self) -> SessionState {
        if self.slot.read().await.session.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub(crate) async fn snapshot(&self) -> SessionSnapshot {
        let slot = self.slot.read().await;
        SessionSnapshot {
            generation: slot.generation,
            token: slot.session.as_ref().map(|session| session.token.clone()),
        }
    }

    /// End the session a rejected request was sent under.
    ///
    /// Returns `true` if this call performed the invalidation, `false` if the
    /// session had already changed since `generation` (another rejection got
    /// there first, or the admin logged in again).
    pub(crate) async fn invalidate(&self, generation: u64) -> bool {
        let mut slot = self.slot.write().await;
        if slot.generation != generation {
            return false;
        }
        Self::clear_slot(&mut slot, self.path.as_deref()).await;
        // Advance even when nothing was held so a concurrent rejection of the
        // same generation is a no-op.
        if slot.generation == generation {
            slot.generation += 1;
        }
        true
    }

    async fn clear_slot(slot: &mut SessionSlot, path: Option<&Path>) {
        let had_session = slot.session.take().is_some();
        if let Some(path) = path {
            remove_session_file(path).await;
        }
        if had_session {
            slot.generation += 1;
            tracing::debug!("Session cleared");
        }
    }
}

/// Write the session file with restricted permissions (0600 on unix).
async fn write_session_file(path: &Path, session: &Session) -> Result<(), AdminError> {
    use tokio::io::AsyncWriteExt;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AdminError::Storage(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    let stored = StoredSession {
        subject_id: session.subject_id.to_string(),
        email: session.email.clone(),
        token: session.token.expose_secret().to_owned(),
    };
    let contents = serde_json::to_vec_pretty(&stored)
        .map_err(|e| AdminError::Storage(format!("failed to serialize session: {e}")))?;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| AdminError::Storage(format!("failed to open {}: {e}", path.display())))?;
    file.write_all(&contents)
        .await
        .map_err(|e| AdminError::Storage(format!("failed to write {}: {e}", path.display())))?;
    file.flush()
        .await
        .map_err(|e| AdminError::Storage(format!("failed to write {}: {e}", path.display())))?;

    // `mode` only applies on creation; tighten a file that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| {
                AdminError::Storage(format!("failed to restrict {}: {e}", path.display()))
            })?;
    }
    Ok(())
}

async fn remove_session_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to remove session file");
        }
    }
}
