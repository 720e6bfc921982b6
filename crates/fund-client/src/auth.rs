use std::fmt;

/// Credentials attached to every request.
///
/// Passed explicitly by the caller; the client never reads tokens from
/// ambient storage.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let auth = AuthContext::bearer("secret-token");
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("secret-token"));
        assert_eq!(auth.token(), "secret-token");
    }
}
