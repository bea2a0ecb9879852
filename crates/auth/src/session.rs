use crate::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Bearer tokens for logged-in users. Sessions expire after a fixed TTL.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a session and returns its token.
    ///
    /// Expired sessions are swept out first, so abandoned logins do not pile up.
    pub fn open(&self, username: &str) -> Result<Uuid, AuthError> {
        let now = Utc::now();
        let token = Uuid::new_v4();
        let session = Session {
            username: username.to_string(),
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(token, session);
        Ok(token)
    }

    /// Number of sessions currently held, live or not yet swept.
    pub fn session_count(&self) -> Result<usize, AuthError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| AuthError::LockPoisoned("read"))?
            .len())
    }

    /// Returns the username behind a live token. Expired sessions are dropped.
    pub fn resolve(&self, token: Uuid) -> Result<Option<String>, AuthError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;

        match sessions.get(&token) {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.username.clone())),
            Some(_) => {
                sessions.remove(&token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Ends a session. Closing an unknown token is not an error.
    pub fn close(&self, token: Uuid) -> Result<(), AuthError> {
        self.sessions
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?
            .remove(&token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resolve_close() {
        let sessions = SessionStore::new(Duration::minutes(5));
        let token = sessions.open("admin").unwrap();

        assert_eq!(sessions.resolve(token).unwrap().as_deref(), Some("admin"));

        sessions.close(token).unwrap();
        assert_eq!(sessions.resolve(token).unwrap(), None);
    }

    #[test]
    fn abandoned_sessions_are_swept_on_login() {
        let sessions = SessionStore::new(Duration::seconds(-1));
        for _ in 0..1000 {
            sessions.open("admin").unwrap();
        }

        assert_eq!(sessions.session_count().unwrap(), 1);
    }

    #[test]
    fn live_sessions_survive_the_sweep() {
        let sessions = SessionStore::new(Duration::minutes(5));
        let first = sessions.open("admin").unwrap();
        sessions.open("meera").unwrap();

        assert_eq!(sessions.session_count().unwrap(), 2);
        assert_eq!(sessions.resolve(first).unwrap().as_deref(), Some("admin"));
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        let sessions = SessionStore::new(Duration::MAX);
        let token = sessions.open("admin").unwrap();

        assert_eq!(sessions.resolve(token).unwrap().as_deref(), Some("admin"));
    }

    #[test]
    fn expired_sessions_do_not_resolve() {
        let sessions = SessionStore::new(Duration::seconds(-1));
        let token = sessions.open("admin").unwrap();

        assert_eq!(sessions.resolve(token).unwrap(), None);
    }
}
