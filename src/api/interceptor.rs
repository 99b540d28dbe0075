//! Request/response interceptors.
//!
//! Interceptors are an explicit ordered list on the client. Each entry
//! carries an outbound hook run before dispatch and a success/failure
//! hook pair run after the exchange resolves, in registration order.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, error};

use crate::auth::{SessionStore, StoreError, TOKEN_KEY, USER_INFO_KEY};
use crate::nav::Navigator;

use super::ApiError;

/// A cross-cutting hook applied around every request issued through
/// the client.
pub trait Interceptor: Send + Sync {
    /// Outbound hook, may mutate the headers about to be dispatched.
    /// An error here aborts the request before dispatch.
    fn before_send(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        let _ = headers;
        Ok(())
    }

    /// Inbound hook for a completed 2xx exchange.
    fn on_success(&self) {}

    /// Inbound hook for a failed exchange. The error is re-raised to
    /// the caller after every registered hook has run.
    fn on_failure(&self, error: &ApiError) {
        let _ = error;
    }
}

/// Attaches the stored bearer token to outbound requests and reacts to
/// a 401 response by clearing the session and redirecting to the login
/// route (unless the user is already there).
pub struct AuthInterceptor {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl AuthInterceptor {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_route: login_route.into(),
        }
    }
}

impl Interceptor for AuthInterceptor {
    fn before_send(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        // No token stored: send the request without the header.
        if let Some(token) = self.store.get(TOKEN_KEY)? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| StoreError(format!("stored token is not a valid header value: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }

    fn on_failure(&self, error: &ApiError) {
        if !error.is_unauthorized() {
            return;
        }

        // A failing store must not mask the original 401 for the caller.
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            error!(error = %e, "failed to clear stored token after 401");
        }
        if let Err(e) = self.store.remove(USER_INFO_KEY) {
            error!(error = %e, "failed to clear stored user info after 401");
        }

        if self.navigator.current_path() != self.login_route {
            debug!(route = %self.login_route, "session expired, redirecting to login");
            self.navigator.redirect(&self.login_route);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::auth::MemorySessionStore;

    struct FakeNavigator {
        path: String,
        redirects: Mutex<Vec<String>>,
    }

    impl FakeNavigator {
        fn at(path: &str) -> Self {
            Self {
                path: path.to_string(),
                redirects: Mutex::new(Vec::new()),
            }
        }

        fn redirects(&self) -> Vec<String> {
            self.redirects.lock().unwrap().clone()
        }
    }

    impl Navigator for FakeNavigator {
        fn current_path(&self) -> String {
            self.path.clone()
        }

        fn redirect(&self, path: &str) {
            self.redirects.lock().unwrap().push(path.to_string());
        }
    }

    fn interceptor(
        store: Arc<MemorySessionStore>,
        navigator: Arc<FakeNavigator>,
    ) -> AuthInterceptor {
        AuthInterceptor::new(store, navigator, "/login")
    }

    #[test]
    fn attaches_bearer_header_when_token_present() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_KEY, "abc123").unwrap();
        let auth = interceptor(store, Arc::new(FakeNavigator::at("/jobs")));

        let mut headers = HeaderMap::new();
        auth.before_send(&mut headers).unwrap();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn leaves_headers_untouched_without_token() {
        let store = Arc::new(MemorySessionStore::new());
        let auth = interceptor(store, Arc::new(FakeNavigator::at("/jobs")));

        let mut headers = HeaderMap::new();
        auth.before_send(&mut headers).unwrap();

        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn unauthorized_clears_session_and_redirects() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_KEY, "abc123").unwrap();
        store.set(USER_INFO_KEY, r#"{"id":1}"#).unwrap();
        let navigator = Arc::new(FakeNavigator::at("/jobs"));
        let auth = interceptor(store.clone(), navigator.clone());

        auth.on_failure(&ApiError::Unauthorized);

        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_INFO_KEY).unwrap().is_none());
        assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
    }

    #[test]
    fn no_redirect_when_already_on_login_page() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_KEY, "abc123").unwrap();
        let navigator = Arc::new(FakeNavigator::at("/login"));
        let auth = interceptor(store.clone(), navigator.clone());

        auth.on_failure(&ApiError::Unauthorized);

        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert!(navigator.redirects().is_empty());
    }

    #[test]
    fn other_errors_leave_session_alone() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_KEY, "abc123").unwrap();
        let navigator = Arc::new(FakeNavigator::at("/jobs"));
        let auth = interceptor(store.clone(), navigator.clone());

        auth.on_failure(&ApiError::NotFound("missing".to_string()));
        auth.on_failure(&ApiError::ServerError("boom".to_string()));

        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
        assert!(navigator.redirects().is_empty());
    }
}
