//! Server-side sessions
//!
//! Sessions live in memory and are lost on restart. The browser only holds
//! an opaque random token in an HttpOnly cookie.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{User, UserId};

pub const SESSION_COOKIE: &str = "bellam_session";

/// What a logged-in request knows about its user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub mobile: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

pub struct SessionStore {
    ttl: chrono::Duration,
    secure: bool,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration, secure: bool) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(12)),
            secure,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    // A poisoned map is still a valid map; keep serving.
    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a session for `user`, returning its token
    pub fn create(&self, user: &User) -> Uuid {
        let token = Uuid::new_v4();
        let session = Session {
            user_id: user.id,
            username: user.username.clone(),
            mobile: user.mobile.clone(),
            expires_at: Utc::now() + self.ttl,
        };
        self.write_map().insert(token, session);
        tracing::info!(user = %user.id, "session started");
        token
    }

    /// Look up a live session; an expired one is dropped
    pub fn get(&self, token: &Uuid) -> Option<Session> {
        let now = Utc::now();
        let session = self.read_map().get(token).cloned()?;
        if session.is_expired(now) {
            self.write_map().remove(token);
            tracing::warn!(user = %session.user_id, "expired session rejected");
            return None;
        }
        Some(session)
    }

    /// End a session; returns whether it existed
    pub fn destroy(&self, token: &Uuid) -> bool {
        let removed = self.write_map().remove(token);
        if let Some(session) = &removed {
            tracing::info!(user = %session.user_id, "session ended");
        }
        removed.is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub fn prune(&self) -> usize {
        let now = Utc::now();
        let mut map = self.write_map();
        let before = map.len();
        map.retain(|_, s| !s.is_expired(now));
        let removed = before - map.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned expired sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Set-Cookie` value carrying `token`
    pub fn cookie_for(&self, token: &Uuid) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl.num_seconds()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clearing_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            SESSION_COOKIE
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    #[cfg(test)]
    fn expire_all(&self) {
        let past = Utc::now() - chrono::Duration::seconds(1);
        for session in self.write_map().values_mut() {
            session.expires_at = past;
        }
    }
}

/// Pull the session token out of the request's `Cookie` headers
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn user() -> User {
        User::new(
            UserId::from_raw(7),
            "asha".into(),
            "9876543210".into(),
            "hash".into(),
        )
    }

    #[test]
    fn test_create_get_destroy() {
        let store = SessionStore::new(Duration::from_secs(60), false);
        let token = store.create(&user());

        let session = store.get(&token).unwrap();
        assert_eq!(session.user_id, UserId::from_raw(7));
        assert_eq!(session.username, "asha");

        assert!(store.destroy(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.destroy(&token));
    }

    #[test]
    fn test_expired_session_rejected_and_removed() {
        let store = SessionStore::new(Duration::from_secs(60), false);
        let token = store.create(&user());
        store.expire_all();

        assert!(store.get(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_prune() {
        let store = SessionStore::new(Duration::from_secs(60), false);
        store.create(&user());
        store.create(&user());
        store.expire_all();
        let live = store.create(&user());

        assert_eq!(store.prune(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&live).is_some());
    }

    #[test]
    fn test_cookie_attributes() {
        let token = Uuid::new_v4();

        let plain = SessionStore::new(Duration::from_secs(60), false).cookie_for(&token);
        assert!(plain.starts_with(&format!("{}={}", SESSION_COOKIE, token)));
        assert!(plain.contains("HttpOnly"));
        assert!(plain.contains("SameSite=Lax"));
        assert!(plain.contains("Path=/"));
        assert!(!plain.contains("Secure"));

        let secure = SessionStore::new(Duration::from_secs(60), true);
        assert!(secure.cookie_for(&token).ends_with("; Secure"));
        assert!(secure.clearing_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_token_from_headers() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, token)).unwrap(),
        );
        assert_eq!(token_from_headers(&headers), Some(token));

        let mut garbage = HeaderMap::new();
        garbage.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}=not-a-uuid", SESSION_COOKIE)).unwrap(),
        );
        assert_eq!(token_from_headers(&garbage), None);
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }
}
