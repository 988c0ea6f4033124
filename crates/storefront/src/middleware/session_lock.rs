//! Per-session request serialization.
//!
//! Cart and wishlist handlers load a list from the session, change it and
//! store it back. Requests carrying the same session cookie are run one at a
//! time so that overlapping changes cannot overwrite each other. The lock is
//! taken outside the session layer and held until the session has been
//! saved.
//!
//! Requests without a session cookie start a fresh session and are not
//! serialized.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// Most sessions tracked at once.
const MAX_TRACKED_SESSIONS: u64 = 100_000;

/// Locks for sessions idle longer than this are dropped.
const LOCK_IDLE_SECONDS: u64 = 60 * 60;

/// One async mutex per session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        let locks = Cache::builder()
            .max_capacity(MAX_TRACKED_SESSIONS)
            .time_to_idle(Duration::from_secs(LOCK_IDLE_SECONDS))
            .build();
        Self { locks }
    }

    /// The lock for a session, created on first use.
    pub async fn lock_for(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .get_with(session_id.to_string(), async { Arc::new(Mutex::new(())) })
            .await
    }
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that runs requests of one session one after another.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let lock = state.session_locks().lock_for(&session_id).await;
    let _guard = lock.lock().await;

    next.run(request).await
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_cookie(cookie: &str) -> Request {
        Request::builder()
            .uri("/api/cart")
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_session_cookie_found_among_others() {
        let request = request_with_cookie("theme=dark; shopfront_session=abc123; lang=en");
        assert_eq!(session_cookie(&request).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_missing() {
        let request = request_with_cookie("theme=dark");
        assert!(session_cookie(&request).is_none());

        let request = Request::builder().body(Body::empty()).unwrap();
        assert!(session_cookie(&request).is_none());
    }

    #[tokio::test]
    async fn test_same_session_shares_lock() {
        let locks = SessionLocks::new();
        let first = locks.lock_for("abc").await;
        let second = locks.lock_for("abc").await;
        let other = locks.lock_for("xyz").await;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));

        let _held = first.lock().await;
        assert!(second.try_lock().is_err());
        assert!(other.try_lock().is_ok());
    }
}
