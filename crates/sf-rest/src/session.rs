//! Authenticated session state.

use forcelink_auth::AuthToken;

/// Access token and instance URL from the last successful authentication.
///
/// Both are set together: the client holds `Option<Session>`, so there is no
/// half-authenticated state.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Session {
    pub(crate) access_token: String,
    pub(crate) instance_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

impl From<AuthToken> for Session {
    fn from(token: AuthToken) -> Self {
        Self {
            access_token: token.access_token,
            instance_url: token.instance_url,
        }
    }
}

impl Session {
    /// `<instance>/services/data/<version>/`.
    pub(crate) fn data_url(&self, api_version: &str) -> String {
        format!(
            "{}/services/data/{}/",
            self.instance_url.trim_end_matches('/'),
            api_version
        )
    }
}
