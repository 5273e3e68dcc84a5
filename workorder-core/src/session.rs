use std::sync::atomic::{AtomicBool, Ordering};

/// The identity collaborator: a single authorization flag plus
/// login/logout. Credential checking lives outside the core; the wizard
/// and store only consult the flag.
pub trait SessionGate: Send + Sync {
    fn is_authorized(&self) -> bool;
    fn login(&self);
    fn logout(&self);
}

/// In-process session flag for tests and the no-backend mode.
#[derive(Debug, Default)]
pub struct MemorySession {
    authorized: AtomicBool,
}

impl MemorySession {
    /// Start logged out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already logged in. Test convenience.
    pub fn authorized() -> Self {
        Self {
            authorized: AtomicBool::new(true),
        }
    }
}

impl SessionGate for MemorySession {
    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    fn login(&self) {
        self.authorized.store(true, Ordering::SeqCst);
    }

    fn logout(&self) {
        self.authorized.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = MemorySession::new();
        assert!(!session.is_authorized());
    }

    #[test]
    fn login_logout_round_trip() {
        let session = MemorySession::new();
        session.login();
        assert!(session.is_authorized());
        session.logout();
        assert!(!session.is_authorized());
    }
}
