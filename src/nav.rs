//! Navigation capability used by the 401 handler.
//!
//! The client never knows what hosts it (a GUI shell, a TUI, a test
//! harness); it only asks where the user currently is and requests a
//! full redirect to the login route when the session expires.

use tracing::debug;

pub trait Navigator: Send + Sync {
    /// Route the application is currently showing.
    fn current_path(&self) -> String;

    /// Full-page redirect to the given route.
    fn redirect(&self, path: &str);
}

/// Navigator for headless use: reports no current route and logs
/// redirect requests instead of performing them.
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn redirect(&self, path: &str) {
        debug!(path, "redirect requested with no navigator attached");
    }
}
