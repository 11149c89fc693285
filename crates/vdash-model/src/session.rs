//! Session context and the optional password gate.
//!
//! The authenticated flag is an explicit value created at the start of an
//! interaction and threaded through the request path, cleared on logout.

/// Environment variable holding the optional dashboard password.
pub const PASSWORD_ENV: &str = "VDASH_PASSWORD";

/// Access policy for the dashboard, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No password configured; every session is authorized.
    Open,
    /// Access requires an exact match on the configured password.
    PasswordProtected { password: String },
}

impl AccessPolicy {
    /// Read the policy from `VDASH_PASSWORD`; unset or empty means open.
    pub fn from_env() -> Self {
        match std::env::var(PASSWORD_ENV) {
            Ok(password) if !password.is_empty() => Self::PasswordProtected { password },
            _ => Self::Open,
        }
    }

    pub fn requires_login(&self) -> bool {
        matches!(self, Self::PasswordProtected { .. })
    }
}

/// Outcome of a login attempt. A failure leaves the session unchanged so
/// the caller can simply re-prompt; there is no lockout or backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    /// Password mismatch.
    Denied,
    /// The policy is open; no credentials were needed.
    NotRequired,
}

/// Per-interaction session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    /// Fresh session at first interaction, not yet authenticated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to authenticate this session against the policy.
    pub fn login(&mut self, policy: &AccessPolicy, attempt: &str) -> LoginOutcome {
        match policy {
            AccessPolicy::Open => LoginOutcome::NotRequired,
            AccessPolicy::PasswordProtected { password } => {
                if attempt == password {
                    self.authenticated = true;
                    LoginOutcome::Granted
                } else {
                    LoginOutcome::Denied
                }
            }
        }
    }

    /// Clear the authenticated flag.
    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// True when the session may proceed under the given policy.
    pub fn is_authorized(&self, policy: &AccessPolicy) -> bool {
        !policy.requires_login() || self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated() -> AccessPolicy {
        AccessPolicy::PasswordProtected {
            password: "s3cret".to_string(),
        }
    }

    #[test]
    fn open_policy_needs_no_login() {
        let session = Session::new();
        assert!(session.is_authorized(&AccessPolicy::Open));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn exact_match_grants_access() {
        let policy = gated();
        let mut session = Session::new();
        assert!(!session.is_authorized(&policy));
        assert_eq!(session.login(&policy, "s3cret"), LoginOutcome::Granted);
        assert!(session.is_authorized(&policy));
    }

    #[test]
    fn mismatch_leaves_session_unauthenticated() {
        let policy = gated();
        let mut session = Session::new();
        assert_eq!(session.login(&policy, "S3CRET"), LoginOutcome::Denied);
        assert_eq!(session.login(&policy, "s3cret "), LoginOutcome::Denied);
        assert!(!session.is_authorized(&policy));
        // Natural retry still works after failures.
        assert_eq!(session.login(&policy, "s3cret"), LoginOutcome::Granted);
    }

    #[test]
    fn logout_clears_flag() {
        let policy = gated();
        let mut session = Session::new();
        session.login(&policy, "s3cret");
        session.logout();
        assert!(!session.is_authorized(&policy));
    }
}
